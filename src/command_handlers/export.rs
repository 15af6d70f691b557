use crate::config::Config;
use crate::errors::Error;
use crate::installer::find_artifact;
use crate::locator::primary_output;
use crate::platform::platform;
use crate::supervisor::{self, ProcessResult, RunOptions};
use crate::ui::UiSink;
use anyhow::{anyhow, bail, Context, Result};
use fs_err as fs;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub struct ExportArgs<'a> {
    pub source: &'a Path,
    pub output_dir: Option<&'a Path>,
    pub fontmake_version: Option<&'a str>,
    pub python: Option<&'a Path>,
    pub install_dir: &'a Path,
    pub strict: bool,
    /// Appended after the configured fontmake arguments.
    pub extra: &'a [String],
    pub cfg: &'a Config,
    pub ui: &'a dyn UiSink,
}

#[derive(Debug)]
pub enum ExportOutcome {
    /// The user dismissed the output directory prompt.
    Cancelled,
    Finished {
        result: ProcessResult,
        primary_output: Option<PathBuf>,
    },
}

impl ExportOutcome {
    pub fn succeeded(&self) -> bool {
        match self {
            ExportOutcome::Cancelled => true,
            ExportOutcome::Finished { result, .. } => result.success(),
        }
    }
}

pub fn run_export(args: ExportArgs) -> Result<ExportOutcome> {
    let ui = args.ui;
    let python = resolve_python(args.python, args.cfg)?;

    if !args.source.exists() {
        bail!("font source {} does not exist", args.source.display());
    }

    let version = args.fontmake_version.or(args.cfg.fontmake_version.as_deref());
    let artifact = find_artifact(args.install_dir, version)?.ok_or_else(|| {
        anyhow!(
            "fontmake {} is not installed in {}; run 'fontmake-pyz download' first",
            version.unwrap_or("(any version)"),
            args.install_dir.display()
        )
    })?;

    let output_dir = match args.output_dir {
        Some(dir) => dir.to_path_buf(),
        None => match ui.prompt_for_directory("Export with fontmake to directory:") {
            Some(dir) => dir,
            None => return Ok(ExportOutcome::Cancelled),
        },
    };
    fs::create_dir_all(&output_dir)?;

    let mut command: Vec<OsString> = vec![python.into(), artifact.path.into()];
    command.extend(args.cfg.fontmake_args.iter().map(OsString::from));
    command.extend(args.extra.iter().map(OsString::from));
    command.push("--output-dir".into());
    command.push(output_dir.into());
    command.push(args.source.into());

    let opts = RunOptions {
        capture_output: true,
        check: args.strict,
    };
    let result = match supervisor::run(&command, opts, ui) {
        Ok(result) => result,
        Err(Error::Process { exit_code }) => {
            ui.notify(&failure_message(exit_code));
            bail!("fontmake exited with code {exit_code}");
        }
        Err(e) => return Err(e).context("running fontmake"),
    };

    if result.success() {
        ui.console_write("Done!");
    } else {
        ui.notify(&failure_message(result.exit_code));
    }

    let primary = result
        .captured_output
        .as_deref()
        .and_then(primary_output)
        .map(PathBuf::from);
    if let Some(path) = &primary {
        ui.reveal(path);
    }
    Ok(ExportOutcome::Finished {
        result,
        primary_output: primary,
    })
}

fn failure_message(exit_code: i32) -> String {
    format!("Subprocess failed (exit code: {exit_code}).\nCheck the output above for details.")
}

/// Flag, then config, then the platform default; must resolve to an
/// existing interpreter.
fn resolve_python(flag: Option<&Path>, cfg: &Config) -> Result<PathBuf> {
    let candidate = flag
        .map(Path::to_path_buf)
        .or_else(|| cfg.python.clone())
        .or_else(|| platform().default_python())
        .ok_or_else(|| anyhow!("no Python 3 interpreter found; pass --python"))?;
    which::which(&candidate).with_context(|| {
        format!(
            "Python 3 could not be found at {}; please make sure it is installed and try again",
            candidate.display()
        )
    })
}
