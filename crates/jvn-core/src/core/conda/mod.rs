//! Conda discovery and environment export.

mod commands;
mod env_name;
mod errors;
mod export;
mod locator;
mod message;

pub use commands::{env_export, env_upload, EnvExportRequest, EnvUploadRequest};
pub use env_name::{resolve_env_name, CONDA_DEFAULT_ENV_VAR};
pub use errors::CondaError;
pub use export::export_environment;
pub use locator::{locate_conda, CONDA_EXE_VAR};
pub use message::activation_message;
