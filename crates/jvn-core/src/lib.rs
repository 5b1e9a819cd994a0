#![deny(clippy::all, warnings)]

mod core;

pub(crate) use crate::core::config::context;
pub(crate) use crate::core::runtime::effects;
pub(crate) use crate::core::{api, config, manifest};

pub use crate::core::api::{ApiError, ApiResponse, HttpTransport, UploadContent, UploadFile, UserProfile};
pub use crate::core::commit::{
    commit_notebook, notebook_commit, CommitError, NotebookCommitRequest, NotebookSession,
    COMMIT_PATH,
};
pub use crate::core::conda::{
    activation_message, env_export, env_upload, export_environment, locate_conda,
    resolve_env_name, CondaError, EnvExportRequest, EnvUploadRequest, CONDA_DEFAULT_ENV_VAR,
    CONDA_EXE_VAR,
};
pub use crate::core::config::context::{CommandContext, CommandGroup, CommandInfo};
pub use crate::core::config::{ApiConfig, CondaConfig, Config, EnvSnapshot, GlobalOptions};
pub use crate::core::manifest::{
    reconcile_manifests, ManifestSource, ReconcileRequest, UploadedManifest,
};
pub use crate::core::runtime::effects::{
    CommandRunner, Effects, SharedEffects, SystemEffects, SystemRunner, Transport,
};
pub use crate::core::runtime::process::RunOutput;
pub use crate::core::tooling::outcome::{
    format_status_message, to_json_response, CommandStatus, ExecutionOutcome,
};

pub(crate) const JVN_VERSION: &str = env!("CARGO_PKG_VERSION");
