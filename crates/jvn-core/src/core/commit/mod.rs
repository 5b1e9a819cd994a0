//! Committing a captured notebook to a project.

mod command;
mod coordinator;
mod session;

pub use command::{notebook_commit, NotebookCommitRequest};
pub use coordinator::{commit_notebook, CommitError, COMMIT_PATH};
pub use session::NotebookSession;
