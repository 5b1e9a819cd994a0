use std::fmt;

use serde::{Deserialize, Serialize};

/// Filename of the platform-neutral manifest, always uploaded first.
pub const CANONICAL_MANIFEST: &str = "environment.yml";

/// Platforms a manifest may be tracked for, in upload order.
pub const SUPPORTED_PLATFORMS: [Platform; 3] = [Platform::Linux, Platform::Macos, Platform::Windows];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    Macos,
    Windows,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Macos => "macos",
            Platform::Windows => "windows",
        }
    }

    /// Maps an operating system identifier (as in `std::env::consts::OS` or a
    /// `sys.platform`-style prefix) onto a tracked platform.
    pub fn from_os(os: &str) -> Option<Self> {
        let os = os.to_ascii_lowercase();
        if os.starts_with("linux") {
            Some(Platform::Linux)
        } else if os == "macos" || os.starts_with("darwin") {
            Some(Platform::Macos)
        } else if os.starts_with("win") {
            Some(Platform::Windows)
        } else {
            None
        }
    }

    /// The platform this process runs on, if it is one we track.
    pub fn current() -> Option<Self> {
        Self::from_os(std::env::consts::OS)
    }

    pub fn manifest_filename(self) -> String {
        format!("environment-{}.yml", self.as_str())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
