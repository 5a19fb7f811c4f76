use anyhow::Result;
use async_trait::async_trait;
use log::debug;

use super::{FeedSource, UpdateRecord, decode_feed};
use crate::http::HttpClient;

/// FileMaker's public updater feed, as referenced by its downloads page.
pub const DEFAULT_FEED_URL: &str =
    "http://www.filemaker.com/support/updaters/updater_json.txt?id=1231231231";

/// Feed fetched with a single HTTP GET.
pub struct HttpFeed {
    client: HttpClient,
    url: String,
}

impl HttpFeed {
    pub fn new(client: HttpClient, url: Option<String>) -> Self {
        let url = url.unwrap_or_else(|| DEFAULT_FEED_URL.to_string());
        Self { client, url }
    }
}

#[async_trait]
impl FeedSource for HttpFeed {
    fn feed_url(&self) -> String {
        self.url.clone()
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_updates(&self) -> Result<Vec<UpdateRecord>> {
        debug!("Fetching update feed from {}...", self.url);
        let body = self.client.get_bytes(&self.url).await?;
        let records = decode_feed(&body)?;
        debug!("Feed lists {} update(s)", records.len());
        Ok(records)
    }
}
