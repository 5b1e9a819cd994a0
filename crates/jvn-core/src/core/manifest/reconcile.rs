use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use jvn_domain::{ManifestBlob, Platform, CANONICAL_MANIFEST};
use serde::Serialize;
use tracing::debug;

use crate::api::UploadFile;
use crate::effects::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ManifestSource {
    /// Exported during this run.
    Fresh,
    /// Read back from a file left by a run on another platform.
    Leftover,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedManifest {
    pub filename: String,
    pub platform: Option<Platform>,
    pub source: ManifestSource,
}

pub struct ReconcileRequest<'a> {
    pub resource_id: &'a str,
    pub manifest: &'a ManifestBlob,
    pub version: Option<&'a str>,
    pub current_platform: Option<Platform>,
    pub supported: &'a [Platform],
    /// Directory searched for `environment-<platform>.yml` leftovers.
    pub root: &'a Path,
}

/// Uploads the canonical manifest, then one manifest per supported platform.
///
/// The current platform always gets the fresh export. Other platforms are
/// only uploaded when a leftover file exists under `root`; leftovers are read,
/// never written. The first failed upload aborts the rest.
///
/// # Errors
/// Returns the first upload or file-read error.
pub fn reconcile_manifests(
    request: &ReconcileRequest<'_>,
    transport: &dyn Transport,
) -> Result<Vec<UploadedManifest>> {
    let mut uploaded = Vec::with_capacity(request.supported.len() + 1);

    upload(
        request,
        transport,
        UploadFile::text(CANONICAL_MANIFEST, request.manifest.as_str()),
    )?;
    uploaded.push(UploadedManifest {
        filename: CANONICAL_MANIFEST.to_string(),
        platform: None,
        source: ManifestSource::Fresh,
    });

    for &platform in request.supported {
        let filename = platform.manifest_filename();
        let (file, source) = if request.current_platform == Some(platform) {
            (
                UploadFile::text(filename.clone(), request.manifest.as_str()),
                ManifestSource::Fresh,
            )
        } else {
            let path = request.root.join(&filename);
            if !path.is_file() {
                debug!(%platform, "no leftover manifest; skipping");
                continue;
            }
            let handle =
                File::open(&path).with_context(|| format!("opening {}", path.display()))?;
            (
                UploadFile::file(filename.clone(), handle),
                ManifestSource::Leftover,
            )
        };
        upload(request, transport, file)?;
        uploaded.push(UploadedManifest {
            filename,
            platform: Some(platform),
            source,
        });
    }

    Ok(uploaded)
}

fn upload(request: &ReconcileRequest<'_>, transport: &dyn Transport, file: UploadFile) -> Result<()> {
    let name = file.name.clone();
    debug!(resource = request.resource_id, file = %name, "uploading manifest");
    transport
        .upload_file(request.resource_id, file, request.version)
        .with_context(|| format!("uploading {name}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::RecordingTransport;
    use jvn_domain::SUPPORTED_PLATFORMS;
    use std::fs;

    const FRESH: &str = "name: ml\ndependencies:\n  - numpy=1.26.4\n";

    fn request<'a>(
        manifest: &'a ManifestBlob,
        current: Option<Platform>,
        supported: &'a [Platform],
        root: &'a Path,
    ) -> ReconcileRequest<'a> {
        ReconcileRequest {
            resource_id: "slug",
            manifest,
            version: Some("2"),
            current_platform: current,
            supported,
            root,
        }
    }

    #[test]
    fn current_fresh_other_leftover_missing_skipped() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        fs::write(tmp.path().join("environment-macos.yml"), "name: old-mac\n")?;
        let manifest = ManifestBlob::new(FRESH)?;
        let transport = RecordingTransport::default();

        let uploaded = reconcile_manifests(
            &request(&manifest, Some(Platform::Linux), &SUPPORTED_PLATFORMS, tmp.path()),
            &transport,
        )?;

        let uploads = transport.uploads();
        assert_eq!(uploads.len(), 3);
        assert_eq!(uploads[0].filename, "environment.yml");
        assert_eq!(uploads[0].content, FRESH);
        assert_eq!(uploads[1].filename, "environment-linux.yml");
        assert_eq!(uploads[1].content, FRESH);
        assert_eq!(uploads[2].filename, "environment-macos.yml");
        assert_eq!(uploads[2].content, "name: old-mac\n");
        assert!(uploads
            .iter()
            .all(|u| u.filename != "environment-windows.yml"));
        assert_eq!(
            uploaded
                .iter()
                .map(|u| u.source)
                .collect::<Vec<_>>(),
            [
                ManifestSource::Fresh,
                ManifestSource::Fresh,
                ManifestSource::Leftover
            ]
        );
        Ok(())
    }

    #[test]
    fn current_platform_ignores_its_own_leftover() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        fs::write(tmp.path().join("environment-linux.yml"), "name: stale\n")?;
        let manifest = ManifestBlob::new(FRESH)?;
        let transport = RecordingTransport::default();

        reconcile_manifests(
            &request(&manifest, Some(Platform::Linux), &SUPPORTED_PLATFORMS, tmp.path()),
            &transport,
        )?;

        let uploads = transport.uploads();
        assert_eq!(uploads.len(), 2);
        assert_eq!(uploads[1].content, FRESH);
        assert_eq!(
            fs::read_to_string(tmp.path().join("environment-linux.yml"))?,
            "name: stale\n",
            "leftover files must not be rewritten"
        );
        Ok(())
    }

    #[test]
    fn upload_order_follows_supported_set() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        fs::write(tmp.path().join("environment-linux.yml"), "linux\n")?;
        fs::write(tmp.path().join("environment-macos.yml"), "mac\n")?;
        let manifest = ManifestBlob::new(FRESH)?;
        let transport = RecordingTransport::default();
        let supported = [Platform::Windows, Platform::Macos, Platform::Linux];

        reconcile_manifests(
            &request(&manifest, Some(Platform::Windows), &supported, tmp.path()),
            &transport,
        )?;

        let names: Vec<String> = transport.uploads().into_iter().map(|u| u.filename).collect();
        assert_eq!(
            names,
            [
                "environment.yml",
                "environment-windows.yml",
                "environment-macos.yml",
                "environment-linux.yml"
            ]
        );
        Ok(())
    }

    #[test]
    fn unsupported_host_uploads_only_canonical_and_leftovers() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        fs::write(tmp.path().join("environment-windows.yml"), "win\n")?;
        let manifest = ManifestBlob::new(FRESH)?;
        let transport = RecordingTransport::default();

        reconcile_manifests(
            &request(&manifest, None, &SUPPORTED_PLATFORMS, tmp.path()),
            &transport,
        )?;

        let names: Vec<String> = transport.uploads().into_iter().map(|u| u.filename).collect();
        assert_eq!(names, ["environment.yml", "environment-windows.yml"]);
        Ok(())
    }

    #[test]
    fn failed_upload_aborts_remaining_platforms() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        fs::write(tmp.path().join("environment-macos.yml"), "mac\n")?;
        fs::write(tmp.path().join("environment-windows.yml"), "win\n")?;
        let manifest = ManifestBlob::new(FRESH)?;
        let transport = RecordingTransport::failing_upload("environment-macos.yml");

        let err = reconcile_manifests(
            &request(&manifest, Some(Platform::Linux), &SUPPORTED_PLATFORMS, tmp.path()),
            &transport,
        )
        .unwrap_err();

        assert!(format!("{err:#}").contains("uploading environment-macos.yml"));
        let names: Vec<String> = transport.uploads().into_iter().map(|u| u.filename).collect();
        assert_eq!(names, ["environment.yml", "environment-linux.yml"]);
        Ok(())
    }
}
