use crate::platform::PlatformOps;
use std::path::{Path, PathBuf};
use std::process::Command;

pub static UNIX_PLATFORM: Unix = Unix;

/// Python installed by the Glyphs 3 "Python" module, relative to $HOME.
#[cfg(target_os = "macos")]
const GLYPHS_PYTHON: &str = "Library/Application Support/Glyphs 3/Repositories/\
GlyphsPythonPlugin/Python.framework/Versions/Current/bin/python3";

pub struct Unix;

impl PlatformOps for Unix {
    fn default_python(&self) -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            if let Some(glyphs) = self.home_dir().map(|h| h.join(GLYPHS_PYTHON)) {
                if glyphs.exists() {
                    return Some(glyphs);
                }
            }
        }
        which::which("python3").ok()
    }
    fn make_executable(&self, path: &Path) -> std::io::Result<()> {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)?.permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(path, perms)
    }
    fn reveal_command(&self, path: &Path) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg("-R").arg(path);
            cmd
        } else {
            // xdg-open cannot select a file, open its folder instead
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(path);
            let mut cmd = Command::new("xdg-open");
            cmd.arg(dir);
            cmd
        }
    }
}
