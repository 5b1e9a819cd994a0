use std::collections::HashMap;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use serde_json::{json, Value};
use tracing_subscriber::fmt::writer::MakeWriter;

use crate::api::{ApiError, ApiResponse, UploadFile, UserProfile};
use crate::effects::{CommandRunner, Transport};
use crate::RunOutput;

/// Scripted stand-in for the process runner.
#[derive(Default)]
pub(crate) struct FakeRunner {
    path: HashMap<String, PathBuf>,
    responses: HashMap<String, RunOutput>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl FakeRunner {
    pub(crate) fn on_path(mut self, program: &str, resolved: &str) -> Self {
        self.path.insert(program.to_string(), PathBuf::from(resolved));
        self
    }

    pub(crate) fn respond(mut self, program: &str, code: i32, stdout: &str) -> Self {
        self.responses.insert(
            program.to_string(),
            RunOutput {
                code,
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        );
        self
    }

    pub(crate) fn respond_stderr(mut self, program: &str, code: i32, stderr: &str) -> Self {
        self.responses.insert(
            program.to_string(),
            RunOutput {
                code,
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
        );
        self
    }

    pub(crate) fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for FakeRunner {
    fn which(&self, program: &str) -> Option<PathBuf> {
        self.path.get(program).cloned()
    }

    fn run(&self, program: &str, args: &[&str]) -> Result<RunOutput> {
        self.calls.lock().unwrap().push((
            program.to_string(),
            args.iter().map(|arg| (*arg).to_string()).collect(),
        ));
        match self.responses.get(program) {
            Some(output) => Ok(output.clone()),
            None => bail!("failed to start {program}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedUpload {
    pub(crate) resource_id: String,
    pub(crate) filename: String,
    pub(crate) content: String,
    pub(crate) version: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedPost {
    pub(crate) path: String,
    pub(crate) data: Value,
    pub(crate) headers: Vec<(String, String)>,
}

/// In-memory transport that records every call.
pub(crate) struct RecordingTransport {
    api_key: Option<String>,
    username: String,
    response: ApiResponse,
    fail_upload: Option<String>,
    uploads: Mutex<Vec<RecordedUpload>>,
    posts: Mutex<Vec<RecordedPost>>,
    user_lookups: Mutex<usize>,
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self {
            api_key: Some("test-key".into()),
            username: "alice".into(),
            response: ApiResponse {
                status: 200,
                body: json!({"data": {}}),
            },
            fail_upload: None,
            uploads: Mutex::new(Vec::new()),
            posts: Mutex::new(Vec::new()),
            user_lookups: Mutex::new(0),
        }
    }
}

impl RecordingTransport {
    pub(crate) fn without_key() -> Self {
        Self {
            api_key: None,
            ..Self::default()
        }
    }

    pub(crate) fn responding(status: u16, body: Value) -> Self {
        Self {
            response: ApiResponse { status, body },
            ..Self::default()
        }
    }

    pub(crate) fn failing_upload(filename: &str) -> Self {
        Self {
            fail_upload: Some(filename.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.lock().unwrap().clone()
    }

    pub(crate) fn posts(&self) -> Vec<RecordedPost> {
        self.posts.lock().unwrap().clone()
    }

    pub(crate) fn user_lookups(&self) -> usize {
        *self.user_lookups.lock().unwrap()
    }
}

impl Transport for RecordingTransport {
    fn auth_headers(&self) -> Result<Vec<(String, String)>> {
        let key = self.api_key.as_deref().ok_or(ApiError::MissingApiKey)?;
        Ok(vec![("Authorization".into(), format!("Bearer {key}"))])
    }

    fn post(&self, path: &str, data: &Value, headers: &[(String, String)]) -> Result<ApiResponse> {
        self.posts.lock().unwrap().push(RecordedPost {
            path: path.to_string(),
            data: data.clone(),
            headers: headers.to_vec(),
        });
        Ok(self.response.clone())
    }

    fn current_user(&self) -> Result<UserProfile> {
        *self.user_lookups.lock().unwrap() += 1;
        self.auth_headers()?;
        Ok(UserProfile {
            username: self.username.clone(),
        })
    }

    fn upload_file(&self, resource_id: &str, file: UploadFile, version: Option<&str>) -> Result<()> {
        self.auth_headers()?;
        let (filename, bytes) = file.into_bytes()?;
        if self.fail_upload.as_deref() == Some(filename.as_str()) {
            bail!("upload failed for {filename}");
        }
        self.uploads.lock().unwrap().push(RecordedUpload {
            resource_id: resource_id.to_string(),
            filename,
            content: String::from_utf8_lossy(&bytes).into_owned(),
            version: version.map(ToOwned::to_owned),
        });
        Ok(())
    }
}

/// Log lines emitted while [`capture_logs`] runs its closure.
#[derive(Clone, Default)]
pub(crate) struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }
}

pub(crate) struct LogWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            buffer: self.buffer.clone(),
        }
    }
}

/// Runs `f` with a thread-local subscriber recording every event as plain
/// text.
pub(crate) fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, LogCapture) {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .finish();
    let value = tracing::subscriber::with_default(subscriber, f);
    (value, capture)
}
