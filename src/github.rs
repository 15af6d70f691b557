use crate::config::Config;
use crate::errors::{Error, Result};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Not every response echoes the tag back; only `assets` is required.
    #[serde(default)]
    pub tag_name: Option<String>,
    pub assets: Vec<Asset>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Asset {
    pub name: String,
    pub browser_download_url: String,
    /// e.g. "sha256:<hex>", only present on newer releases
    #[serde(default)]
    pub digest: Option<String>,
}

#[derive(Deserialize)]
struct LatestRelease {
    tag_name: String,
}

/// Strip exactly one leading `v` from a release tag.
pub fn normalize_version(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

pub fn expected_asset_name(template: &str, version: &str) -> String {
    template.replace("{version}", version)
}

/// First asset whose name is exactly `expected`.
pub fn select_asset<'a>(assets: &'a [Asset], expected: &str) -> Option<&'a Asset> {
    assets.iter().find(|a| a.name == expected)
}

pub fn http_client(cfg: &Config) -> Result<Client> {
    Client::builder()
        .user_agent(cfg.user_agent.as_str())
        .build()
        .map_err(Error::network)
}

/// Read-only access to the releases API of the configured repository.
pub struct ReleaseClient<'a> {
    client: Client,
    cfg: &'a Config,
}

impl<'a> ReleaseClient<'a> {
    pub fn new(cfg: &'a Config) -> Result<Self> {
        Ok(Self {
            client: http_client(cfg)?,
            cfg,
        })
    }

    /// Resolve the `latest` pointer to a concrete tag. Single attempt.
    pub fn resolve_latest_tag(&self) -> Result<String> {
        let url = format!("{}/releases/latest", self.cfg.repo_api_url());
        let latest: LatestRelease = self.get_json(&url)?;
        log::info!("latest release is {}", latest.tag_name);
        Ok(latest.tag_name)
    }

    pub fn fetch_release(&self, tag: &str) -> Result<Release> {
        let url = format!("{}/releases/tags/{tag}", self.cfg.repo_api_url());
        self.get_json(&url)
    }

    /// Locate the platform archive for `tag`. No fallback names are tried.
    pub fn resolve_asset(&self, tag: &str) -> Result<Asset> {
        let release = self.fetch_release(tag)?;
        let expected = expected_asset_name(&self.cfg.asset_template, normalize_version(tag));
        log::debug!(
            "release {} has {} assets, looking for {expected}",
            release.tag_name.as_deref().unwrap_or(tag),
            release.assets.len()
        );
        select_asset(&release.assets, &expected)
            .cloned()
            .ok_or_else(|| Error::AssetNotFound {
                tag: tag.to_string(),
                expected,
            })
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.cfg.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        log::debug!("GET {url}");
        let resp = self
            .authorized(self.client.get(url))
            .header("Accept", "application/vnd.github+json")
            .send()
            .map_err(Error::network)?;
        let status = resp.status();
        if status != StatusCode::OK {
            return Err(Error::NotFound(format!("GET {url} returned {status}")));
        }
        let body = resp.text().map_err(Error::network)?;
        serde_json::from_str(&body)
            .map_err(|e| Error::NotFound(format!("unexpected response from {url}: {e}")))
    }
}
