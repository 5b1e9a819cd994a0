use color_eyre::{eyre::eyre, Result};
use jvn_core::{
    ApiError, CommandContext, CommandGroup, CommandInfo, EnvExportRequest, EnvUploadRequest,
    ExecutionOutcome, NotebookCommitRequest,
};
use serde_json::json;

use crate::cli::{CommandGroupCli, EnvCommand};

pub fn dispatch_command(
    ctx: &CommandContext,
    group: &CommandGroupCli,
) -> Result<(CommandInfo, ExecutionOutcome)> {
    match group {
        CommandGroupCli::Env(EnvCommand::Export(args)) => {
            let info = CommandInfo::new(CommandGroup::Env, "export");
            let request = EnvExportRequest {
                name: args.name.clone(),
            };
            core_call(info, || jvn_core::env_export(ctx, &request))
        }
        CommandGroupCli::Env(EnvCommand::Upload(args)) => {
            let info = CommandInfo::new(CommandGroup::Env, "upload");
            let request = EnvUploadRequest {
                resource_id: args.resource_id.clone(),
                version: args.version.clone(),
                name: args.name.clone(),
                platform: args.platform.map(Into::into),
            };
            core_call(info, || jvn_core::env_upload(ctx, &request))
        }
        CommandGroupCli::Commit(args) => {
            let info = CommandInfo::new(CommandGroup::Commit, "commit");
            let request = NotebookCommitRequest {
                project: args.project.clone(),
                privacy: args.privacy.into(),
                file_id: args.file_id.clone(),
            };
            core_call(info, || jvn_core::notebook_commit(ctx, &request))
        }
    }
}

fn core_call<F>(info: CommandInfo, action: F) -> Result<(CommandInfo, ExecutionOutcome)>
where
    F: FnOnce() -> anyhow::Result<ExecutionOutcome>,
{
    match action() {
        Ok(outcome) => Ok((info, outcome)),
        Err(err) => match api_error_outcome(&err) {
            Some(outcome) => Ok((info, outcome)),
            None => Err(eyre!("{err:?}")),
        },
    }
}

fn api_error_outcome(err: &anyhow::Error) -> Option<ExecutionOutcome> {
    match err.downcast_ref::<ApiError>()? {
        ApiError::Status { url, response } => Some(ExecutionOutcome::failure(
            format!("{err:#}"),
            json!({
                "reason": "api_rejected",
                "url": url,
                "response": response,
            }),
        )),
        ApiError::MissingApiKey => Some(ExecutionOutcome::user_error(
            err.to_string(),
            json!({
                "reason": "missing_api_key",
                "hint": "export JVN_API_KEY with a token from your account settings",
            }),
        )),
    }
}
