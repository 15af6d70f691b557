use crate::config::Config;
use crate::installer::{InstalledArtifact, Installer};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

pub struct DownloadArgs<'a> {
    /// Concrete tag; `None` resolves the latest release.
    pub tag: Option<&'a str>,
    pub install_dir: &'a Path,
    pub force: bool,
    pub cfg: &'a Config,
}

pub fn run_download(args: DownloadArgs) -> Result<InstalledArtifact> {
    let installer = Installer::new(args.cfg)?;
    let tag = match args.tag {
        Some(t) => t.to_string(),
        None => installer
            .releases()
            .resolve_latest_tag()
            .context("failed to retrieve the latest release version")?,
    };

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {msg} {bytes}")?);
    pb.enable_steady_tick(Duration::from_millis(120));
    let res = installer.install_if_missing(&tag, args.install_dir, args.force, Some(&pb));
    pb.finish_and_clear();
    res.with_context(|| format!("installing fontmake {tag}"))
}
