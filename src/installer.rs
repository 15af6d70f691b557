use crate::config::Config;
use crate::errors::{Error, Result};
use crate::github::{expected_asset_name, http_client, normalize_version, Asset, ReleaseClient};
use crate::platform::platform;
use crate::redirect::RedirectFollower;
use fs_err as fs;
use indicatif::ProgressBar;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::Client;
use semver::Version;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Name of the zip-app inside the release archive's top-level directory.
const INNER_BINARY: &str = "fontmake";

static ARTIFACT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^fontmake-(.+)\.pyz$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledArtifact {
    pub path: PathBuf,
    pub version: String,
}

pub fn artifact_file_name(version: &str) -> String {
    format!("fontmake-{version}.pyz")
}

/// Downloads a release archive and turns it into `fontmake-{version}.pyz`.
pub struct Installer<'a> {
    cfg: &'a Config,
    releases: ReleaseClient<'a>,
    redirects: RedirectFollower,
    client: Client,
}

impl<'a> Installer<'a> {
    pub fn new(cfg: &'a Config) -> Result<Self> {
        Ok(Self {
            cfg,
            releases: ReleaseClient::new(cfg)?,
            redirects: RedirectFollower::new(cfg)?,
            client: http_client(cfg)?,
        })
    }

    pub fn releases(&self) -> &ReleaseClient<'a> {
        &self.releases
    }

    /// Like [`Installer::install`] but returns the existing artifact for
    /// `tag` without any network access unless `force` is set.
    pub fn install_if_missing(
        &self,
        tag: &str,
        output_dir: &Path,
        force: bool,
        pb: Option<&ProgressBar>,
    ) -> Result<InstalledArtifact> {
        let version = normalize_version(tag);
        let existing = output_dir.join(artifact_file_name(version));
        if !force && existing.is_file() {
            log::info!("fontmake {version} already installed at {}", existing.display());
            return Ok(InstalledArtifact {
                path: existing,
                version: version.to_string(),
            });
        }
        self.install(tag, output_dir, pb)
    }

    /// Full download, extract, validate and rename cycle for `tag`.
    ///
    /// Fails fast: whatever was written before a failing step stays on disk.
    /// The archive and extracted directory are only removed on success.
    pub fn install(
        &self,
        tag: &str,
        output_dir: &Path,
        pb: Option<&ProgressBar>,
    ) -> Result<InstalledArtifact> {
        let version = normalize_version(tag);
        let archive_name = expected_asset_name(&self.cfg.asset_template, version);
        fs::create_dir_all(output_dir)?;
        let archive_path = output_dir.join(&archive_name);

        set_message(pb, format!("Resolving {archive_name}"));
        let asset = self.releases.resolve_asset(tag)?;
        let url = self.redirects.resolve(&asset.browser_download_url)?;

        set_message(pb, format!("Downloading {archive_name}"));
        log::info!("downloading {url}");
        download(&self.client, &url, &archive_path, pb)?;
        verify_asset_digest(&asset, &archive_path)?;

        set_message(pb, format!("Extracting {archive_name}"));
        let artifact = unpack(&archive_path, output_dir, version)?;
        log::info!("extracted to {}", output_dir.display());
        Ok(artifact)
    }
}

fn set_message(pb: Option<&ProgressBar>, msg: String) {
    if let Some(p) = pb {
        p.set_message(msg);
    }
}

fn download(client: &Client, url: &str, dest: &Path, pb: Option<&ProgressBar>) -> Result<()> {
    let mut resp = client
        .get(url)
        .send()
        .map_err(|e| Error::Download(format!("GET {url}: {e}")))?;
    if !resp.status().is_success() {
        return Err(Error::Download(format!("GET {url} returned {}", resp.status())));
    }
    let mut out = fs::File::create(dest)?;
    let copied = match pb {
        Some(p) => {
            if let Some(len) = resp.content_length() {
                p.set_length(len);
            }
            resp.copy_to(&mut p.wrap_write(&mut out))
        }
        None => resp.copy_to(&mut out),
    };
    let bytes = copied.map_err(|e| Error::Download(format!("reading {url}: {e}")))?;
    log::debug!("wrote {bytes} bytes to {}", dest.display());
    Ok(())
}

fn verify_asset_digest(asset: &Asset, path: &Path) -> Result<()> {
    let Some(expected) = asset.digest.as_deref().and_then(|d| d.strip_prefix("sha256:")) else {
        return Ok(());
    };
    let mut hasher = Sha256::new();
    std::io::copy(&mut fs::File::open(path)?, &mut hasher)?;
    let actual = hex::encode(hasher.finalize());
    if !actual.eq_ignore_ascii_case(expected) {
        return Err(Error::Download(format!(
            "checksum mismatch for {}: expected {expected} got {actual}",
            asset.name
        )));
    }
    Ok(())
}

/// Extract `archive` into `output_dir` and move `{stem}/fontmake` to
/// `output_dir/fontmake-{version}.pyz`.
pub fn unpack(archive: &Path, output_dir: &Path, version: &str) -> Result<InstalledArtifact> {
    let mut zip = ZipArchive::new(fs::File::open(archive)?)
        .map_err(|e| Error::Extract(format!("{}: {e}", archive.display())))?;
    zip.extract(output_dir)
        .map_err(|e| Error::Extract(format!("{}: {e}", archive.display())))?;

    let stem = archive
        .file_stem()
        .ok_or_else(|| Error::Extract(format!("no file stem in {}", archive.display())))?;
    let extracted_dir = output_dir.join(stem);
    if !extracted_dir.is_dir() {
        return Err(Error::Extract(format!(
            "{} did not contain {}",
            archive.display(),
            extracted_dir.display()
        )));
    }

    let inner = extracted_dir.join(INNER_BINARY);
    if !inner.is_file() {
        return Err(Error::Validation(format!(
            "extracted archive does not contain '{INNER_BINARY}': {}",
            extracted_dir.display()
        )));
    }

    let target = output_dir.join(artifact_file_name(version));
    fs::rename(&inner, &target)?;
    platform().make_executable(&target)?;

    let _ = std::fs::remove_dir_all(&extracted_dir);
    fs::remove_file(archive)?;
    Ok(InstalledArtifact {
        path: target,
        version: version.to_string(),
    })
}

/// Installed artifacts in `dir`, newest version first. Versions that are not
/// semver sort after the rest.
pub fn find_installed(dir: &Path) -> Result<Vec<InstalledArtifact>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut found = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(caps) = name.to_str().and_then(|n| ARTIFACT_RE.captures(n)) else {
            continue;
        };
        if entry.path().is_file() {
            found.push(InstalledArtifact {
                path: entry.path(),
                version: caps[1].to_string(),
            });
        }
    }
    found.sort_by(|a, b| {
        match (Version::parse(&a.version), Version::parse(&b.version)) {
            (Ok(va), Ok(vb)) => vb.cmp(&va),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => b.version.cmp(&a.version),
        }
    });
    Ok(found)
}

/// The artifact for `version`, or the newest installed one when `None`.
pub fn find_artifact(dir: &Path, version: Option<&str>) -> Result<Option<InstalledArtifact>> {
    match version {
        Some(v) => {
            let v = normalize_version(v);
            let path = dir.join(artifact_file_name(v));
            Ok(path.is_file().then(|| InstalledArtifact {
                path,
                version: v.to_string(),
            }))
        }
        None => Ok(find_installed(dir)?.into_iter().next()),
    }
}
