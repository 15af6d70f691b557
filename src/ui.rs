use crate::platform::platform;
use inquire::{InquireError, Text};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Everything the pipelines need from whoever is hosting them.
pub trait UiSink {
    /// Append one line of live output.
    fn console_write(&self, line: &str);
    /// `None` when the user cancelled.
    fn prompt_for_directory(&self, message: &str) -> Option<PathBuf>;
    fn reveal(&self, path: &Path);
    fn notify(&self, message: &str);
}

/// Host for running from a terminal: output on stdout, messages on stderr.
pub struct TerminalUi {
    title: String,
}

impl TerminalUi {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl UiSink for TerminalUi {
    fn console_write(&self, line: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{line}");
        let _ = out.flush();
    }

    fn prompt_for_directory(&self, message: &str) -> Option<PathBuf> {
        match Text::new(message).prompt() {
            Ok(answer) if !answer.trim().is_empty() => Some(PathBuf::from(answer.trim())),
            Ok(_) => None,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => None,
            Err(e) => {
                log::warn!("prompt failed: {e}");
                None
            }
        }
    }

    fn reveal(&self, path: &Path) {
        if !path.exists() {
            log::debug!("not revealing missing {}", path.display());
            return;
        }
        match platform().reveal_command(path).status() {
            Ok(status) if status.success() => {}
            Ok(status) => log::warn!("reveal {} exited with {status}", path.display()),
            Err(e) => log::warn!("could not reveal {}: {e}", path.display()),
        }
    }

    fn notify(&self, message: &str) {
        eprintln!("[{}] {message}", self.title);
    }
}
