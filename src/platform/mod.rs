pub fn platform() -> &'static dyn PlatformOps {
    &ConcretePlatform
}

use std::path::{Path, PathBuf};
use std::process::Command;

pub trait PlatformOps: Sync + Send {
    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
    fn default_install_dir(&self) -> Option<PathBuf> {
        self.home_dir().map(|h| h.join(".fontmake-pyz"))
    }
    /// Interpreter used to run the zip-app when none is configured.
    fn default_python(&self) -> Option<PathBuf>;
    fn make_executable(&self, path: &Path) -> std::io::Result<()>;
    /// Command that shows `path` in the system file manager.
    fn reveal_command(&self, path: &Path) -> Command;
}

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub use unix::UNIX_PLATFORM as ConcretePlatform;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::WINDOWS_PLATFORM as ConcretePlatform;
