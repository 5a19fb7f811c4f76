//! Package details derived from an updater download URL.

use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use reqwest::Url;

use crate::error::ProcessorError;

/// Full four-part build number embedded in updater file names, e.g. `fmp_19.2.1.23.dmg`.
static FULL_VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{2}\.[0-9]{0,2}\.[0-9]{0,2}\.[0-9]{0,4})").unwrap());

/// Last segment of the URL path, ignoring query and fragment.
///
/// Returns an empty string when the path ends with `/`.
pub fn package_file_name(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
            .to_string(),
        Err(_) => {
            let path = url.split(['?', '#']).next().unwrap_or_default();
            path.rsplit('/').next().unwrap_or_default().to_string()
        }
    }
}

/// Extract the full build number from the file name of an updater URL.
pub fn version_from_url(url: &str) -> Result<String> {
    let file_name = package_file_name(url);
    FULL_VERSION_PATTERN
        .captures(&file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ProcessorError::VersionPatternNotFound(url.to_string()).into())
}
