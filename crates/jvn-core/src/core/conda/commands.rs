use anyhow::Result;
use jvn_domain::{BinaryPath, EnvironmentName, ManifestBlob, Platform, SUPPORTED_PLATFORMS};
use serde_json::json;
use tracing::info;

use super::{activation_message, export_environment, locate_conda, resolve_env_name, CondaError};
use crate::api::ApiError;
use crate::manifest::{reconcile_manifests, ReconcileRequest};
use crate::{CommandContext, ExecutionOutcome};

#[derive(Clone, Debug, Default)]
pub struct EnvExportRequest {
    /// Environment to export instead of the active one.
    pub name: Option<String>,
}

#[derive(Clone, Debug)]
pub struct EnvUploadRequest {
    pub resource_id: String,
    pub version: Option<String>,
    pub name: Option<String>,
    /// Platform to record the fresh manifest under; defaults to the host.
    pub platform: Option<Platform>,
}

struct Capture {
    binary: BinaryPath,
    name: EnvironmentName,
    manifest: ManifestBlob,
}

fn capture(ctx: &CommandContext, name: Option<&str>) -> Result<Capture, CondaError> {
    let binary = locate_conda(ctx.runner(), ctx.config().conda())?;
    let name = match name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(explicit) => EnvironmentName::new(explicit),
        None => resolve_env_name(ctx.config().conda()),
    };
    let manifest = export_environment(ctx.runner(), &binary, &name)?;
    Ok(Capture {
        binary,
        name,
        manifest,
    })
}

fn conda_error_outcome(err: &CondaError) -> ExecutionOutcome {
    match err {
        CondaError::BinaryNotFound { command, env_var } => ExecutionOutcome::user_error(
            err.to_string(),
            json!({
                "reason": "conda_not_found",
                "command": command,
                "env_var": env_var,
                "hint": format!("install conda or export {env_var}=/path/to/conda"),
            }),
        ),
        CondaError::ExportFailed { command } => ExecutionOutcome::failure(
            err.to_string(),
            json!({
                "reason": "export_failed",
                "command": command,
                "hint": "check that the environment exists with `conda env list`",
            }),
        ),
    }
}

/// Exports the active (or named) conda environment.
///
/// # Errors
/// Conda failures are reported through the outcome; the `Result` is reserved
/// for unexpected errors.
pub fn env_export(ctx: &CommandContext, request: &EnvExportRequest) -> Result<ExecutionOutcome> {
    let capture = match capture(ctx, request.name.as_deref()) {
        Ok(capture) => capture,
        Err(err) => return Ok(conda_error_outcome(&err)),
    };
    Ok(ExecutionOutcome::success(
        format!("exported conda environment `{}`", capture.name),
        json!({
            "environment": capture.name,
            "binary": capture.binary,
            "manifest": capture.manifest.as_str(),
            "activation": activation_message(&capture.name),
        }),
    ))
}

/// Captures the environment and uploads it, together with any leftover
/// manifests from other platforms, to `resource_id`.
///
/// # Errors
/// Returns an error when an upload fails for a reason other than
/// authentication.
pub fn env_upload(ctx: &CommandContext, request: &EnvUploadRequest) -> Result<ExecutionOutcome> {
    let capture = match capture(ctx, request.name.as_deref()) {
        Ok(capture) => capture,
        Err(err) => return Ok(conda_error_outcome(&err)),
    };
    let current_platform = request.platform.or_else(Platform::current);
    let reconcile = ReconcileRequest {
        resource_id: &request.resource_id,
        manifest: &capture.manifest,
        version: request.version.as_deref(),
        current_platform,
        supported: &SUPPORTED_PLATFORMS,
        root: ctx.working_dir(),
    };
    let uploaded = match reconcile_manifests(&reconcile, ctx.transport()) {
        Ok(uploaded) => uploaded,
        Err(err) if matches!(err.downcast_ref::<ApiError>(), Some(ApiError::MissingApiKey)) => {
            return Ok(ExecutionOutcome::user_error(
                err.to_string(),
                json!({
                    "reason": "missing_api_key",
                    "hint": "export JVN_API_KEY with a token from your account settings",
                }),
            ));
        }
        Err(err) => return Err(err),
    };
    info!(
        resource = %request.resource_id,
        count = uploaded.len(),
        "uploaded environment manifests"
    );

    Ok(ExecutionOutcome::success(
        format!(
            "uploaded {} manifest{} to {}",
            uploaded.len(),
            if uploaded.len() == 1 { "" } else { "s" },
            request.resource_id
        ),
        json!({
            "resource_id": request.resource_id,
            "version": request.version,
            "environment": capture.name,
            "binary": capture.binary,
            "platform": current_platform,
            "uploads": uploaded,
            "activation": activation_message(&capture.name),
        }),
    ))
}
