use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use std::path::PathBuf;

use crate::{feed::HttpFeed, http::HttpClient, runtime::Runtime};

/// Environment variable the recipe host uses for its per-recipe cache directory.
pub const RECIPE_CACHE_DIR_ENV: &str = "RECIPE_CACHE_DIR";

const USER_AGENT: &str = "pkgmeta-cli";

pub struct Config<R: Runtime> {
    pub runtime: R,
    pub client: HttpClient,
    pub feed_url: Option<String>,
}

impl<R: Runtime> Config<R> {
    pub fn new(runtime: R, feed_url: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            runtime,
            client: HttpClient::new(client),
            feed_url,
        })
    }

    /// Update feed backed by the shared HTTP client.
    pub fn feed(&self) -> HttpFeed {
        HttpFeed::new(self.client.clone(), self.feed_url.clone())
    }
}

/// Cache directory: explicit flag, then `RECIPE_CACHE_DIR`, then the user cache dir.
pub fn resolve_cache_dir<R: Runtime>(runtime: &R, explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }

    if let Ok(dir) = runtime.env_var(RECIPE_CACHE_DIR_ENV) {
        if !dir.is_empty() {
            debug!("Using {} from environment: {}", RECIPE_CACHE_DIR_ENV, dir);
            return Ok(PathBuf::from(dir));
        }
    }

    runtime
        .cache_dir()
        .map(|dir| dir.join("pkgmeta"))
        .context("Could not determine a cache directory; pass --cache-dir")
}
