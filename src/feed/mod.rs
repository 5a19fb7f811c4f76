//! Update feed records and the sources that supply them.
//!
//! The feed is a JSON array of objects with `platform`, `product`, `version`,
//! `url` and `name` keys. It is decoded once, here, into [`UpdateRecord`]s;
//! everything downstream works on the typed records.

mod http;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProcessorError;

pub use http::{DEFAULT_FEED_URL, HttpFeed};

/// One entry from an update feed.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct UpdateRecord {
    /// Target platform, e.g. "Mac" or "Windows"
    pub platform: String,
    /// Product family, e.g. "FileMaker Pro" or "FileMaker Server"
    pub product: String,
    /// Free-form version string, e.g. "19.1.2" or "18.0.3a"
    pub version: String,
    /// Download location of the updater
    pub url: String,
    /// Display name of the updater
    pub name: String,
}

/// Decode a raw feed body into update records.
pub fn decode_feed(body: &[u8]) -> Result<Vec<UpdateRecord>> {
    serde_json::from_slice(body).map_err(|e| {
        ProcessorError::FetchFailure(format!("failed to decode update feed: {}", e)).into()
    })
}

/// Anything that can hand out the current list of update records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Location the records come from, for log messages.
    fn feed_url(&self) -> String;

    /// Fetch and decode the whole feed.
    async fn fetch_updates(&self) -> Result<Vec<UpdateRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::kind_of;

    #[test]
    fn test_decode_feed() {
        let body = br#"[
            {
                "platform": "Mac",
                "product": "FileMaker Pro",
                "version": "19.1.2",
                "url": "https://example.com/fmp_19.1.2.23.dmg",
                "name": "FileMaker Pro 19.1.2",
                "releaseDate": "2020-08-01"
            }
        ]"#;

        let records = decode_feed(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].platform, "Mac");
        assert_eq!(records[0].version, "19.1.2");
        assert_eq!(records[0].name, "FileMaker Pro 19.1.2");
    }

    #[test]
    fn test_decode_empty_feed() {
        assert!(decode_feed(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_feed_missing_field() {
        let body = br#"[{"platform": "Mac", "product": "FileMaker Pro", "version": "19.1.2"}]"#;
        let err = decode_feed(body).unwrap_err();
        assert!(matches!(kind_of(&err), Some(ProcessorError::FetchFailure(_))));
        assert!(err.to_string().contains("failed to decode update feed"));
    }

    #[test]
    fn test_decode_feed_not_json() {
        let err = decode_feed(b"<html>maintenance</html>").unwrap_err();
        assert!(matches!(kind_of(&err), Some(ProcessorError::FetchFailure(_))));
    }
}
