use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use serde::Serialize;

use super::{Processor, ProcessorInfo, VariableSpec};
use crate::feed::{FeedSource, UpdateRecord};
use crate::package::{package_file_name, version_from_url};
use crate::selector::VersionSelector;

/// Full installers are published under a fixed path keyed by the build number.
pub const FULL_INSTALLER_URL_TEMPLATE: &str =
    "http://fmdl.filemaker.com/maint/107-85rel/fmp_{version}.dmg";

const PLATFORM: &str = "Mac";
const EXCLUDED_PRODUCT: &str = "Server";

pub(super) static INFO: ProcessorInfo = ProcessorInfo {
    name: "filemaker-url",
    description: "Provides a download URL for the most recent version of FileMaker Pro",
    inputs: &[
        VariableSpec {
            name: "major_version",
            required: true,
            description: "The major version for which updater should be downloaded",
        },
        VariableSpec {
            name: "do_full_installer",
            required: false,
            description: "Look for a full installer URL instead of the updater",
        },
    ],
    outputs: &[
        VariableSpec {
            name: "url",
            required: false,
            description: "Download URL of the selected updater",
        },
        VariableSpec {
            name: "version",
            required: false,
            description: "Version to expect",
        },
        VariableSpec {
            name: "package_name",
            required: false,
            description: "Display name of the updater",
        },
        VariableSpec {
            name: "package_file",
            required: false,
            description: "File name of the package to download",
        },
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilemakerInput {
    pub major_version: String,
    pub do_full_installer: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FilemakerOutput {
    pub url: String,
    pub version: String,
    pub package_name: String,
    pub package_file: String,
}

/// Finds the newest Mac FileMaker Pro updater for one major version.
pub struct FilemakerUpdateUrl<F: FeedSource> {
    feed: F,
}

impl<F: FeedSource> FilemakerUpdateUrl<F> {
    pub fn new(feed: F) -> Self {
        Self { feed }
    }

    /// Fetch the feed and select the newest client updater in the release line.
    #[tracing::instrument(skip(self))]
    pub async fn latest_update(&self, major_version: &str) -> Result<UpdateRecord> {
        let records = self
            .feed
            .fetch_updates()
            .await
            .with_context(|| format!("Failed to load updates from {}", self.feed.feed_url()))?;

        let updates = VersionSelector::filter_by_platform(&records, PLATFORM);
        let updates = VersionSelector::filter_excluding_product_pattern(&updates, EXCLUDED_PRODUCT);
        let updates = VersionSelector::filter_by_major_version_prefix(&updates, major_version);
        debug!(
            "{} of {} feed entries are {} client updates for {}",
            updates.len(),
            records.len(),
            PLATFORM,
            major_version
        );

        let latest = VersionSelector::select_latest(&updates)
            .with_context(|| format!("Failed to select the latest {} update", major_version))?;
        Ok(latest.clone())
    }
}

fn full_installer_url(version: &str) -> String {
    FULL_INSTALLER_URL_TEMPLATE.replace("{version}", version)
}

#[async_trait]
impl<F: FeedSource> Processor for FilemakerUpdateUrl<F> {
    type Input = FilemakerInput;
    type Output = FilemakerOutput;

    fn info(&self) -> &'static ProcessorInfo {
        &INFO
    }

    #[tracing::instrument(skip(self))]
    async fn process(&self, input: &FilemakerInput) -> Result<FilemakerOutput> {
        if input.major_version.is_empty() {
            anyhow::bail!("major_version must not be empty");
        }

        let update = self.latest_update(&input.major_version).await?;

        let (url, version) = if input.do_full_installer {
            let version = version_from_url(&update.url)?;
            (full_installer_url(&version), version)
        } else {
            (update.url.clone(), update.version.clone())
        };

        info!("URL found '{}'", url);

        Ok(FilemakerOutput {
            package_file: package_file_name(&url),
            url,
            version,
            package_name: update.name,
        })
    }
}
