use std::fmt;

use serde::{Deserialize, Serialize};

/// Visibility requested for a committed notebook.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Privacy {
    #[default]
    Auto,
    Secret,
    Private,
    Public,
}

impl Privacy {
    pub fn as_str(self) -> &'static str {
        match self {
            Privacy::Auto => "auto",
            Privacy::Secret => "secret",
            Privacy::Private => "private",
            Privacy::Public => "public",
        }
    }

    /// Value of the legacy `public` flag sent next to `visibility`.
    ///
    /// The open variant carries no flag; the server decides from `visibility`.
    pub fn public_flag(self) -> Option<bool> {
        match self {
            Privacy::Auto => Some(true),
            Privacy::Secret | Privacy::Private => Some(false),
            Privacy::Public => None,
        }
    }
}

impl fmt::Display for Privacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualifies a bare project name with the owner handle.
///
/// Names that already carry an owner (`owner/name`) are returned unchanged
/// and `handle` is never called.
pub fn qualify_project<E>(
    project: &str,
    handle: impl FnOnce() -> Result<String, E>,
) -> Result<String, E> {
    if project.contains('/') {
        Ok(project.to_string())
    } else {
        Ok(format!("{}/{project}", handle()?))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommitPayload {
    pub project: String,
    pub file_id: Option<String>,
    pub visibility: Privacy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
}

impl CommitPayload {
    pub fn new(project: impl Into<String>, file_id: Option<String>, privacy: Privacy) -> Self {
        Self {
            project: project.into(),
            file_id,
            visibility: privacy,
            public: privacy.public_flag(),
        }
    }
}
