use crate::config::Config;
use crate::errors::{Error, Result};
use reqwest::blocking::Client;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::Url;

pub const MAX_REDIRECTS: usize = 10;

const REDIRECT_STATUSES: [u16; 4] = [301, 302, 303, 307];

/// Resolves a download URL to the host that actually serves it, using HEAD
/// requests so no body is transferred.
pub struct RedirectFollower {
    client: Client,
    max_hops: usize,
}

impl RedirectFollower {
    pub fn new(cfg: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .redirect(Policy::none())
            .build()
            .map_err(Error::network)?;
        Ok(Self {
            client,
            max_hops: MAX_REDIRECTS,
        })
    }

    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    pub fn resolve(&self, url: &str) -> Result<String> {
        let mut current = url.to_string();
        for _ in 0..=self.max_hops {
            let resp = self
                .client
                .head(&current)
                .send()
                .map_err(Error::network)?;
            let status = resp.status().as_u16();
            if !REDIRECT_STATUSES.contains(&status) {
                return Ok(current);
            }
            // a redirect without a target is treated as final
            let Some(location) = resp.headers().get(LOCATION).and_then(|v| v.to_str().ok())
            else {
                return Ok(current);
            };
            let next = join_location(&current, location)?;
            log::debug!("{status} {current} -> {next}");
            current = next;
        }
        Err(Error::Network(format!(
            "too many redirects (>{}) resolving {url}",
            self.max_hops
        )))
    }
}

fn join_location(base: &str, location: &str) -> Result<String> {
    let base = Url::parse(base).map_err(|e| Error::Network(format!("bad url {base}: {e}")))?;
    base.join(location)
        .map(String::from)
        .map_err(|e| Error::Network(format!("bad redirect location {location}: {e}")))
}
