//! Merging per-platform environment manifests into one upload set.

mod reconcile;

pub use reconcile::{reconcile_manifests, ManifestSource, ReconcileRequest, UploadedManifest};
