use crate::installer::find_installed;
use anyhow::Result;
use std::path::Path;

pub fn list_installed(dir: &Path) -> Result<()> {
    let found = find_installed(dir)?;
    if found.is_empty() {
        println!("No fontmake installed in {}; run 'fontmake-pyz download'", dir.display());
        return Ok(());
    }
    for a in found {
        println!("{} {}", a.version, a.path.display());
    }
    Ok(())
}
