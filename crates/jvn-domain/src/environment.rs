use std::fmt;

use serde::{Deserialize, Serialize};

/// Environment used when no active environment is advertised.
pub const DEFAULT_ENVIRONMENT: &str = "base";

/// Bare command name probed before any explicit override.
pub const DEFAULT_CONDA_COMMAND: &str = "conda";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvironmentName(String);

impl EnvironmentName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Interprets the raw value of the active-environment variable.
    ///
    /// Unset and empty values resolve to [`DEFAULT_ENVIRONMENT`]; anything else
    /// is taken verbatim.
    pub fn from_env_value(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if !value.is_empty() => Self(value.to_string()),
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EnvironmentName {
    fn default() -> Self {
        Self(DEFAULT_ENVIRONMENT.to_string())
    }
}

impl fmt::Display for EnvironmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Location of the conda executable: either the bare command name found on
/// `PATH` or an explicit path taken from the environment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BinaryPath(String);

impl BinaryPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BinaryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("environment export produced no output")]
pub struct EmptyManifest;

/// Exported environment description, kept as opaque text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestBlob(String);

impl ManifestBlob {
    /// Wraps exported text. Empty output never counts as a valid export; any
    /// other text, whitespace included, is kept as is.
    pub fn new(text: impl Into<String>) -> Result<Self, EmptyManifest> {
        let text = text.into();
        if text.is_empty() {
            return Err(EmptyManifest);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
