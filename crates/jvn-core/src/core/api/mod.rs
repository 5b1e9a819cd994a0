//! Wire types and the HTTP implementation of [`crate::Transport`].

mod http;
mod multipart;

use std::fs::File;
use std::io::Read;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

pub use http::HttpTransport;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("no API key configured; set JVN_API_KEY")]
    MissingApiKey,
    #[error("request to {url} failed: {response}")]
    Status { url: String, response: String },
}

/// Status and decoded body of an API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Human-readable rendering used in error messages.
    #[must_use]
    pub fn pretty(&self) -> String {
        let body = match &self.body {
            Value::String(text) => text.clone(),
            Value::Null => String::new(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        };
        if body.is_empty() {
            format!("(HTTP {})", self.status)
        } else {
            format!("(HTTP {}) {body}", self.status)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    pub username: String,
}

/// Body of an uploaded file.
#[derive(Debug)]
pub enum UploadContent {
    Text(String),
    File(File),
}

#[derive(Debug)]
pub struct UploadFile {
    pub name: String,
    pub content: UploadContent,
}

impl UploadFile {
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: UploadContent::Text(text.into()),
        }
    }

    pub fn file(name: impl Into<String>, file: File) -> Self {
        Self {
            name: name.into(),
            content: UploadContent::File(file),
        }
    }

    /// Drains the content into memory.
    ///
    /// # Errors
    /// Returns an error when a file-backed upload cannot be read.
    pub fn into_bytes(self) -> Result<(String, Vec<u8>)> {
        let bytes = match self.content {
            UploadContent::Text(text) => text.into_bytes(),
            UploadContent::File(mut file) => {
                let mut buf = Vec::new();
                file.read_to_end(&mut buf)
                    .with_context(|| format!("reading {}", self.name))?;
                buf
            }
        };
        Ok((self.name, bytes))
    }
}
