use jvn_domain::{BinaryPath, EnvironmentName, ManifestBlob};
use tracing::{debug, warn};

use super::CondaError;
use crate::effects::CommandRunner;

/// Exports `name` as a build-string-free manifest.
///
/// Only the output decides success: a non-zero exit with output is accepted,
/// and a spawn failure counts as empty output.
///
/// # Errors
/// Returns [`CondaError::ExportFailed`] when the export printed nothing at
/// all. Whitespace is output and is passed through.
pub fn export_environment(
    runner: &dyn CommandRunner,
    binary: &BinaryPath,
    name: &EnvironmentName,
) -> Result<ManifestBlob, CondaError> {
    let args = ["env", "export", "-n", name.as_str(), "--no-builds"];
    let command = format!("{binary} {}", args.join(" "));
    debug!(%command, "exporting conda environment");

    let stdout = match runner.run(binary.as_str(), &args) {
        Ok(output) => {
            if !output.success() {
                warn!(code = output.code, stderr = %output.stderr.trim(), "conda env export exited with an error");
            }
            output.stdout
        }
        Err(err) => {
            warn!(%err, "conda env export could not be started");
            String::new()
        }
    };
    ManifestBlob::new(stdout).map_err(|_| CondaError::ExportFailed { command })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::FakeRunner;

    const MANIFEST: &str = "name: ml\nchannels:\n  - defaults\ndependencies:\n  - numpy=1.26.4\n";

    #[test]
    fn returns_stdout_verbatim() {
        let runner = FakeRunner::default().respond("/opt/conda/bin/conda", 0, MANIFEST);
        let blob = export_environment(
            &runner,
            &BinaryPath::new("/opt/conda/bin/conda"),
            &EnvironmentName::new("ml"),
        )
        .unwrap();
        assert_eq!(blob.as_str(), MANIFEST);
        assert_eq!(
            runner.calls(),
            vec![(
                "/opt/conda/bin/conda".to_string(),
                vec!["env", "export", "-n", "ml", "--no-builds"]
                    .into_iter()
                    .map(String::from)
                    .collect::<Vec<_>>()
            )]
        );
    }

    #[test]
    fn output_wins_over_exit_status() {
        let runner = FakeRunner::default().respond("conda", 1, MANIFEST);
        let blob = export_environment(&runner, &BinaryPath::new("conda"), &EnvironmentName::default());
        assert!(blob.is_ok());
    }

    #[test]
    fn empty_output_fails_with_command() {
        let runner = FakeRunner::default().respond("conda", 0, "");
        let err = export_environment(&runner, &BinaryPath::new("conda"), &EnvironmentName::new("gone"))
            .unwrap_err();
        assert_eq!(
            err,
            CondaError::ExportFailed {
                command: "conda env export -n gone --no-builds".into()
            }
        );
        assert!(err.to_string().contains("\"conda env export -n gone --no-builds\""));
    }

    #[test]
    fn whitespace_output_is_not_empty() {
        let runner = FakeRunner::default().respond("conda", 0, "\n");
        let blob = export_environment(&runner, &BinaryPath::new("conda"), &EnvironmentName::new("ml"))
            .unwrap();
        assert_eq!(blob.as_str(), "\n");
    }

    #[test]
    fn spawn_failure_is_export_failed() {
        let runner = FakeRunner::default();
        let err = export_environment(&runner, &BinaryPath::new("/nope"), &EnvironmentName::default())
            .unwrap_err();
        assert!(matches!(err, CondaError::ExportFailed { .. }));
    }
}
