use anyhow::{Context, Result};
use fs_err as fs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "fontmake-pyz.toml";
pub const TOKEN_ENV: &str = "GITHUB_ACCESS_TOKEN";

/// Settings shared by the download and export pipelines.
///
/// Every field has a default, so an absent or partial `fontmake-pyz.toml`
/// is fine. The bearer token never comes from the file, only from
/// `GITHUB_ACCESS_TOKEN`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub api_base_url: String,
    pub owner: String,
    pub repo: String,
    pub user_agent: String,
    /// Release asset name. Supports {version}.
    pub asset_template: String,
    pub install_dir: Option<PathBuf>,
    pub python: Option<PathBuf>,
    /// Pinned fontmake version used by `export`; newest installed when unset.
    pub fontmake_version: Option<String>,
    /// Passed to fontmake verbatim, before `--output-dir`.
    pub fontmake_args: Vec<String>,
    #[serde(skip)]
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            owner: "googlefonts".to_string(),
            repo: "fontmake".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            asset_template: "fontmake-{version}-cp311-cp311-macosx_11_0_universal2.zip".to_string(),
            install_dir: None,
            python: None,
            fontmake_version: None,
            // builds a TrueType-flavored variable font
            fontmake_args: vec!["-o".to_string(), "variable".to_string()],
            token: None,
        }
    }
}

impl Config {
    /// Load `path`, or the default config file when `path` is `None`.
    ///
    /// A missing default file yields the built-in defaults; a missing
    /// explicitly requested file is an error.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut cfg = match path {
            Some(p) => Self::from_file(Path::new(p))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Config::default(),
        };
        cfg.token = std::env::var(TOKEN_ENV).ok().filter(|t| !t.trim().is_empty());
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::parse(&data).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(data: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(data)?;
        log::debug!("loaded config: {cfg:?}");
        Ok(cfg)
    }

    /// `{api_base_url}/repos/{owner}/{repo}`
    pub fn repo_api_url(&self) -> String {
        format!(
            "{}/repos/{}/{}",
            self.api_base_url.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }
}
