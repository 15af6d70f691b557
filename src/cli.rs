use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    version,
    name = "fontmake-pyz",
    about = "Fetch the standalone fontmake zip-app from GitHub Releases and export fonts with it"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config (defaults to ./fontmake-pyz.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Increase log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download a fontmake release and unpack it as fontmake-{version}.pyz
    /// Examples:
    ///   fontmake-pyz download                  # latest release
    ///   fontmake-pyz download --tag v3.7.0     # specific tag
    Download {
        /// Release tag; the latest release when omitted
        #[arg(long)]
        tag: Option<String>,
        /// Where to put the .pyz (defaults to config install_dir, then ~/.fontmake-pyz)
        #[arg(long)]
        install_dir: Option<PathBuf>,
        /// Download again even if that version is already installed
        #[arg(long)]
        force: bool,
    },
    /// Build a font source with an installed fontmake
    /// Extra fontmake arguments go after `--`, e.g.
    ///   fontmake-pyz export MyFont.glyphs -o build -- --verbose=DEBUG
    Export {
        /// Font source (.glyphs, .glyphspackage, .designspace, .ufo)
        #[arg(value_name = "SOURCE")]
        source: PathBuf,
        /// Output directory; prompted for when omitted
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Installed fontmake version to use (defaults to config, then newest installed)
        #[arg(long)]
        fontmake_version: Option<String>,
        /// Python interpreter running the zip-app
        #[arg(long)]
        python: Option<PathBuf>,
        #[arg(long)]
        install_dir: Option<PathBuf>,
        /// Fail with a non-zero status as soon as fontmake does
        #[arg(long)]
        strict: bool,
        #[arg(last = true, value_name = "FONTMAKE_ARGS")]
        extra: Vec<String>,
    },
    /// List installed fontmake versions, newest first
    List {
        #[arg(long)]
        install_dir: Option<PathBuf>,
    },
}
