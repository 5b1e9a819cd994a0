use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::multipart::{boundary_for, build_upload_body};
use super::{ApiError, ApiResponse, UploadFile, UserProfile};
use crate::config::ApiConfig;
use crate::effects::Transport;
use crate::JVN_VERSION;

/// Builds the blocking client shared by every API call.
///
/// # Errors
/// Returns an error when the TLS backend cannot be initialised.
pub(crate) fn build_http_client(keep_proxies: bool) -> Result<Client> {
    let builder = Client::builder()
        .user_agent(format!("jvn/{JVN_VERSION}"))
        .timeout(Duration::from_secs(60));
    let builder = if keep_proxies {
        builder
    } else {
        builder.no_proxy()
    };
    builder.build().context("failed to build HTTP client")
}

pub struct HttpTransport {
    client: Client,
    config: ApiConfig,
}

impl HttpTransport {
    /// # Errors
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: build_http_client(config.keep_proxies)?,
            config: config.clone(),
        })
    }

    fn with_headers(request: RequestBuilder, headers: &[(String, String)]) -> RequestBuilder {
        headers
            .iter()
            .fold(request, |request, (name, value)| {
                request.header(name.as_str(), value.as_str())
            })
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

fn decode_response(response: Response) -> Result<ApiResponse> {
    let status = response.status().as_u16();
    let text = response.text().context("failed to read response body")?;
    let body = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap_or(Value::String(text))
    };
    Ok(ApiResponse { status, body })
}

impl Transport for HttpTransport {
    fn auth_headers(&self) -> Result<Vec<(String, String)>> {
        let key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ApiError::MissingApiKey)?;
        Ok(vec![("Authorization".to_string(), format!("Bearer {key}"))])
    }

    fn post(&self, path: &str, data: &Value, headers: &[(String, String)]) -> Result<ApiResponse> {
        let url = self.config.endpoint(path);
        debug!(%url, "POST");
        let request = Self::with_headers(self.client.post(&url), headers).json(data);
        let response = request
            .send()
            .with_context(|| format!("request to {url} failed"))?;
        decode_response(response)
    }

    fn current_user(&self) -> Result<UserProfile> {
        let url = self.config.endpoint("/user/profile");
        debug!(%url, "GET");
        let headers = self.auth_headers()?;
        let response = Self::with_headers(self.client.get(&url), &headers)
            .send()
            .with_context(|| format!("request to {url} failed"))?;
        let response = decode_response(response)?;
        if !response.is_ok() {
            return Err(ApiError::Status {
                url,
                response: response.pretty(),
            }
            .into());
        }
        let envelope: Envelope<UserProfile> =
            serde_json::from_value(response.body).context("invalid user profile payload")?;
        Ok(envelope.data)
    }

    fn upload_file(&self, resource_id: &str, file: UploadFile, version: Option<&str>) -> Result<()> {
        let url = self.config.endpoint(&format!("/gist/{resource_id}/upload"));
        let (filename, bytes) = file.into_bytes()?;
        debug!(%url, %filename, bytes = bytes.len(), "uploading file");
        let boundary = boundary_for(&filename, &bytes);
        let body = build_upload_body(&boundary, &[("artifact", "false")], "files", &filename, &bytes);

        let mut request = Self::with_headers(self.client.post(&url), &self.auth_headers()?)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(body);
        if let Some(version) = version {
            request = request.query(&[("gist_version", version)]);
        }
        let response = request
            .send()
            .with_context(|| format!("failed to upload {filename}"))?;
        let response = decode_response(response)?;
        if !response.is_ok() {
            return Err(ApiError::Status {
                url,
                response: response.pretty(),
            })
            .with_context(|| format!("upload failed for {filename}"));
        }
        Ok(())
    }
}
