#![deny(clippy::all, warnings)]
#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

pub mod commit;
pub mod environment;
pub mod platform;

pub use commit::{qualify_project, CommitPayload, Privacy};
pub use environment::{
    BinaryPath, EmptyManifest, EnvironmentName, ManifestBlob, DEFAULT_CONDA_COMMAND,
    DEFAULT_ENVIRONMENT,
};
pub use platform::{Platform, CANONICAL_MANIFEST, SUPPORTED_PLATFORMS};
