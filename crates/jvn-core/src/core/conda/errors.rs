use jvn_domain::DEFAULT_CONDA_COMMAND;

use super::CONDA_EXE_VAR;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CondaError {
    #[error(
        "conda binary not found; make sure the `{command}` command is on your PATH \
         or ${env_var} points to the conda executable"
    )]
    BinaryNotFound {
        command: &'static str,
        env_var: &'static str,
    },
    #[error("failed to read conda environment using command: \"{command}\"")]
    ExportFailed { command: String },
}

impl CondaError {
    pub(crate) fn binary_not_found() -> Self {
        CondaError::BinaryNotFound {
            command: DEFAULT_CONDA_COMMAND,
            env_var: CONDA_EXE_VAR,
        }
    }
}
