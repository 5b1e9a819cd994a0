#![allow(dead_code)]

use std::fs;
use std::panic;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use httptest::Server;
use serde_json::Value;

pub const MANIFEST: &str = "name: ml\ndependencies:\n  - python=3.11\n";

/// `jvn` with a scrubbed environment: no conda on PATH and no API settings.
pub fn jvn(cwd: &Path, path_dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("jvn");
    cmd.current_dir(cwd)
        .env("PATH", path_dir)
        .env("NO_COLOR", "1")
        .env_remove("CONDA_EXE")
        .env_remove("CONDA_DEFAULT_ENV")
        .env_remove("JVN_API_URL")
        .env_remove("JVN_API_KEY")
        .env_remove("JVN_KEEP_PROXIES");
    cmd
}

pub fn server_or_skip(test: &str) -> Option<Server> {
    if let Ok(server) = panic::catch_unwind(Server::run) {
        Some(server)
    } else {
        eprintln!("skipping {test} (httptest server unavailable)");
        None
    }
}

pub fn api_url(server: &Server) -> String {
    server.url_str("/").trim_end_matches('/').to_string()
}

pub fn parse_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("json output")
}

/// Writes a shell script named `conda` that answers `--version` and prints
/// [`MANIFEST`] for any other invocation.
#[cfg(unix)]
pub fn fake_conda(dir: &Path) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("conda");
    let body = format!(
        "#!/bin/sh\nif [ \"$1\" = \"--version\" ]; then\n  echo \"conda 24.1.2\"\n  exit 0\nfi\nprintf '%s' '{MANIFEST}'\n"
    );
    fs::write(&script, body).expect("write fake conda");
    let mut perms = fs::metadata(&script).expect("metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&script, perms).expect("chmod fake conda");
    script
}
