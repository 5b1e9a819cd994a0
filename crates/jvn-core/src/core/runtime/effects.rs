use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;

use super::process::{run_command, RunOutput};
use crate::config::ApiConfig;
use crate::core::api::{ApiResponse, HttpTransport, UploadFile, UserProfile};

/// Spawns external programs on behalf of the conda helpers.
pub trait CommandRunner: Send + Sync {
    /// Looks `program` up on `PATH`.
    fn which(&self, program: &str) -> Option<PathBuf>;
    fn run(&self, program: &str, args: &[&str]) -> Result<RunOutput>;
}

/// Remote project-tracking service.
pub trait Transport: Send + Sync {
    /// Headers that authenticate a request.
    fn auth_headers(&self) -> Result<Vec<(String, String)>>;
    fn post(&self, path: &str, data: &Value, headers: &[(String, String)]) -> Result<ApiResponse>;
    fn current_user(&self) -> Result<UserProfile>;
    fn upload_file(&self, resource_id: &str, file: UploadFile, version: Option<&str>) -> Result<()>;
}

pub trait Effects: Send + Sync {
    fn runner(&self) -> &dyn CommandRunner;
    fn transport(&self) -> &dyn Transport;
}

pub type SharedEffects = Arc<dyn Effects>;

pub struct SystemEffects {
    runner: Arc<SystemRunner>,
    transport: Arc<HttpTransport>,
}

impl SystemEffects {
    /// # Errors
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(api: &ApiConfig) -> Result<Self> {
        Ok(Self {
            runner: Arc::new(SystemRunner),
            transport: Arc::new(HttpTransport::new(api)?),
        })
    }
}

impl Effects for SystemEffects {
    fn runner(&self) -> &dyn CommandRunner {
        self.runner.as_ref()
    }

    fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn which(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }

    fn run(&self, program: &str, args: &[&str]) -> Result<RunOutput> {
        run_command(program, args)
    }
}
