use std::collections::HashMap;
use std::env;

use crate::core::net::keep_proxies;

pub const DEFAULT_API_URL: &str = "https://api.jovian.ai";

/// Command-line settings that shape configuration.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// `--api-url`, taking precedence over `JVN_API_URL`.
    pub api_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    pub fn capture() -> Self {
        Self {
            vars: env::vars().collect(),
        }
    }

    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Returns the variable only when it holds something besides whitespace.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.var(key)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    #[cfg(test)]
    pub(crate) fn testing(pairs: &[(&str, &str)]) -> Self {
        let vars = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Self { vars }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) api: ApiConfig,
    pub(crate) conda: CondaConfig,
}

impl Config {
    #[must_use]
    pub fn from_snapshot(snapshot: &EnvSnapshot, global: &GlobalOptions) -> Self {
        let base_url = global
            .api_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .or_else(|| snapshot.non_empty("JVN_API_URL"))
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();
        Self {
            api: ApiConfig {
                base_url,
                api_key: snapshot.non_empty("JVN_API_KEY").map(ToOwned::to_owned),
                keep_proxies: keep_proxies(snapshot),
            },
            conda: CondaConfig {
                exe_override: snapshot
                    .non_empty(crate::CONDA_EXE_VAR)
                    .map(ToOwned::to_owned),
                active_env: snapshot
                    .var(crate::CONDA_DEFAULT_ENV_VAR)
                    .map(ToOwned::to_owned),
            },
        }
    }

    #[must_use]
    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    #[must_use]
    pub fn conda(&self) -> &CondaConfig {
        &self.conda
    }
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub keep_proxies: bool,
}

impl ApiConfig {
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CondaConfig {
    /// Explicit conda executable from `CONDA_EXE`, blank values dropped.
    pub exe_override: Option<String>,
    /// Raw `CONDA_DEFAULT_ENV` value.
    pub active_env: Option<String>,
}
