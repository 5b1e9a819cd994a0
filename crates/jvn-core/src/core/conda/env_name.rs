use jvn_domain::EnvironmentName;
use tracing::info;

use crate::config::CondaConfig;

/// Variable conda sets to the name of the activated environment.
pub const CONDA_DEFAULT_ENV_VAR: &str = "CONDA_DEFAULT_ENV";

/// Name of the active conda environment, `base` when none is advertised.
pub fn resolve_env_name(conda: &CondaConfig) -> EnvironmentName {
    let name = EnvironmentName::from_env_value(conda.active_env.as_deref());
    info!(env = %name, "conda environment");
    name
}
