pub mod dispatch;
pub mod download;
pub mod export;
pub mod list;

use crate::config::Config;
use crate::platform::platform;
use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

/// Flag, then config, then the platform default.
pub fn resolve_install_dir(flag: Option<&Path>, cfg: &Config) -> Result<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| cfg.install_dir.clone())
        .or_else(|| platform().default_install_dir())
        .ok_or_else(|| anyhow!("cannot determine install directory; pass --install-dir"))
}
