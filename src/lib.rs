pub mod cli;
pub mod command_handlers;
pub mod config;
pub mod errors;
pub mod github;
pub mod installer;
pub mod locator;
pub mod platform;
pub mod redirect;
pub mod supervisor;
pub mod ui;

pub use config::Config;
pub use errors::{Error, Result};
pub use installer::{InstalledArtifact, Installer};
pub use supervisor::{ProcessResult, RunOptions};
pub use ui::{TerminalUi, UiSink};
