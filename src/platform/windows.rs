use crate::platform::PlatformOps;
use std::path::{Path, PathBuf};
use std::process::Command;

pub static WINDOWS_PLATFORM: Windows = Windows;

pub struct Windows;

impl PlatformOps for Windows {
    fn default_python(&self) -> Option<PathBuf> { which::which("python").ok() }
    fn make_executable(&self, _path: &Path) -> std::io::Result<()> { Ok(()) }
    fn reveal_command(&self, path: &Path) -> Command {
        let mut cmd = Command::new("explorer");
        cmd.arg(format!("/select,{}", path.display()));
        cmd
    }
}
