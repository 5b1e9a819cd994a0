use jvn_domain::{BinaryPath, DEFAULT_CONDA_COMMAND};
use tracing::{debug, info};

use super::CondaError;
use crate::config::CondaConfig;
use crate::effects::CommandRunner;

/// Variable naming an explicit conda executable.
pub const CONDA_EXE_VAR: &str = "CONDA_EXE";

/// Resolves the conda executable.
///
/// `conda` on `PATH` wins when it answers `--version`; only then is
/// `CONDA_EXE` consulted. Every call probes again.
///
/// # Errors
/// Returns [`CondaError::BinaryNotFound`] when neither candidate is live.
pub fn locate_conda(
    runner: &dyn CommandRunner,
    conda: &CondaConfig,
) -> Result<BinaryPath, CondaError> {
    if let Some(path) = runner.which(DEFAULT_CONDA_COMMAND) {
        let candidate = path.to_string_lossy().into_owned();
        if is_live(runner, &candidate) {
            info!(binary = %candidate, "conda binary");
            return Ok(BinaryPath::new(candidate));
        }
        debug!(binary = %candidate, "conda on PATH did not answer --version");
    }

    let Some(explicit) = conda.exe_override.as_deref() else {
        return Err(CondaError::binary_not_found());
    };
    if !is_live(runner, explicit) {
        return Err(CondaError::binary_not_found());
    }
    info!(binary = %explicit, "conda binary (from {CONDA_EXE_VAR})");
    Ok(BinaryPath::new(explicit))
}

// Old conda releases print the version on stderr.
fn is_live(runner: &dyn CommandRunner, program: &str) -> bool {
    match runner.run(program, &["--version"]) {
        Ok(output) => {
            output.success()
                && !(output.stdout.trim().is_empty() && output.stderr.trim().is_empty())
        }
        Err(err) => {
            debug!(%program, %err, "conda probe failed to start");
            false
        }
    }
}
