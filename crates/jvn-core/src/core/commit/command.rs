use anyhow::Result;
use jvn_domain::Privacy;
use serde_json::json;

use super::{commit_notebook, CommitError, NotebookSession};
use crate::api::ApiError;
use crate::{CommandContext, ExecutionOutcome};

#[derive(Clone, Debug)]
pub struct NotebookCommitRequest {
    pub project: String,
    pub privacy: Privacy,
    /// File reference handed over by the notebook host, if any.
    pub file_id: Option<String>,
}

/// Commits a captured notebook and reports the server's version data.
///
/// # Errors
/// Commit failures are reported through the outcome; the `Result` is reserved
/// for unexpected errors.
pub fn notebook_commit(
    ctx: &CommandContext,
    request: &NotebookCommitRequest,
) -> Result<ExecutionOutcome> {
    let mut session = NotebookSession::new();
    if let Some(file_id) = request.file_id.as_deref() {
        session.capture(file_id);
    }

    match commit_notebook(ctx.transport(), &session, &request.project, request.privacy) {
        Ok(data) => Ok(ExecutionOutcome::success(
            format!("committed notebook to {}", request.project),
            json!({
                "project": request.project,
                "visibility": request.privacy,
                "file_id": session.file_id(),
                "data": data,
            }),
        )),
        Err(CommitError::Transport(err))
            if matches!(err.downcast_ref::<ApiError>(), Some(ApiError::MissingApiKey)) =>
        {
            Ok(ExecutionOutcome::user_error(
                err.to_string(),
                json!({
                    "reason": "missing_api_key",
                    "hint": "export JVN_API_KEY with a token from your account settings",
                }),
            ))
        }
        Err(err @ (CommitError::Rejected { .. } | CommitError::MissingData { .. })) => {
            let status = match &err {
                CommitError::Rejected { status, .. } => Some(*status),
                _ => None,
            };
            Ok(ExecutionOutcome::failure(
                err.to_string(),
                json!({
                    "reason": "commit_rejected",
                    "project": request.project,
                    "http_status": status,
                }),
            ))
        }
        Err(CommitError::Transport(err)) => Err(err),
    }
}
