use tracing::warn;

/// Holds the file reference handed over by a notebook host until the commit
/// that consumes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotebookSession {
    file_id: Option<String>,
}

impl NotebookSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file_id(file_id: impl Into<String>) -> Self {
        Self {
            file_id: Some(file_id.into()),
        }
    }

    /// Records the file reference. A second capture replaces the first.
    pub fn capture(&mut self, file_id: impl Into<String>) {
        let file_id = file_id.into();
        if let Some(previous) = self.file_id.replace(file_id) {
            warn!(%previous, "replacing previously captured notebook file id");
        }
    }

    #[must_use]
    pub fn file_id(&self) -> Option<&str> {
        self.file_id.as_deref()
    }
}
