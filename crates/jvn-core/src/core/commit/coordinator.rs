use anyhow::Context;
use jvn_domain::{qualify_project, CommitPayload, Privacy};
use serde_json::Value;
use tracing::{error, info};

use super::NotebookSession;
use crate::effects::Transport;

pub const COMMIT_PATH: &str = "/gist/colab-commit";

#[derive(Debug, thiserror::Error)]
pub enum CommitError {
    #[error("notebook commit failed: {response}")]
    Rejected { status: u16, response: String },
    #[error("notebook commit response did not include `data`: {response}")]
    MissingData { response: String },
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

/// Commits the notebook captured in `session` to `project`.
///
/// A bare project name is qualified with the authenticated user's handle. A
/// session without a file reference is logged and still committed.
///
/// # Errors
/// Returns [`CommitError::Rejected`] for any non-200 response and
/// [`CommitError::Transport`] when the request cannot be made.
pub fn commit_notebook(
    transport: &dyn Transport,
    session: &NotebookSession,
    project: &str,
    privacy: Privacy,
) -> Result<Value, CommitError> {
    let file_id = session.file_id().map(ToOwned::to_owned);
    if file_id.is_none() {
        error!("notebook file id was not captured; committing without it");
    }

    let project = qualify_project(project, || {
        transport
            .current_user()
            .map(|user| user.username)
            .context("failed to look up the current user")
    })?;

    let payload = CommitPayload::new(project, file_id, privacy);
    let data = serde_json::to_value(&payload).context("failed to encode commit payload")?;
    let headers = transport.auth_headers()?;

    info!(project = %payload.project, visibility = %privacy, "uploading notebook commit");
    let response = transport.post(COMMIT_PATH, &data, &headers)?;
    if !response.is_ok() {
        return Err(CommitError::Rejected {
            status: response.status,
            response: response.pretty(),
        });
    }
    match response.body.get("data") {
        Some(data) => Ok(data.clone()),
        None => Err(CommitError::MissingData {
            response: response.pretty(),
        }),
    }
}
