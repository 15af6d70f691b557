use crate::cli::Commands;
use crate::command_handlers::{download, export, list, resolve_install_dir};
use crate::config::Config;
use crate::ui::TerminalUi;
use anyhow::Result;

/// Run one subcommand. `Ok(false)` means it ran but the build failed and the
/// user has already been told why.
pub fn dispatch(cmd: Commands, cfg: &Config) -> Result<bool> {
    match cmd {
        Commands::Download {
            tag,
            install_dir,
            force,
        } => {
            let dir = resolve_install_dir(install_dir.as_deref(), cfg)?;
            let args = download::DownloadArgs {
                tag: tag.as_deref(),
                install_dir: &dir,
                force,
                cfg,
            };
            let artifact = download::run_download(args)?;
            println!(
                "Installed fontmake {} at {}",
                artifact.version,
                artifact.path.display()
            );
            Ok(true)
        }
        Commands::Export {
            source,
            output_dir,
            fontmake_version,
            python,
            install_dir,
            strict,
            extra,
        } => {
            let dir = resolve_install_dir(install_dir.as_deref(), cfg)?;
            let ui = TerminalUi::new("Export with fontmake");
            let args = export::ExportArgs {
                source: &source,
                output_dir: output_dir.as_deref(),
                fontmake_version: fontmake_version.as_deref(),
                python: python.as_deref(),
                install_dir: &dir,
                strict,
                extra: &extra,
                cfg,
                ui: &ui,
            };
            Ok(export::run_export(args)?.succeeded())
        }
        Commands::List { install_dir } => {
            let dir = resolve_install_dir(install_dir.as_deref(), cfg)?;
            list::list_installed(&dir)?;
            Ok(true)
        }
    }
}
