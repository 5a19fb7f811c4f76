use anyhow::Result;

use crate::processor::{FilemakerInput, FilemakerUpdateUrl, Processor};
use crate::runtime::Runtime;

use super::config::Config;
use super::output::{OutputFormat, render};

/// Print the download details of the newest FileMaker Pro updater.
#[tracing::instrument(skip(runtime, feed_url))]
pub async fn filemaker_url<R: Runtime>(
    runtime: R,
    major_version: &str,
    do_full_installer: bool,
    feed_url: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let config = Config::new(runtime, feed_url)?;
    let processor = FilemakerUpdateUrl::new(config.feed());
    let input = FilemakerInput {
        major_version: major_version.to_string(),
        do_full_installer,
    };

    let output = processor.process(&input).await?;
    println!("{}", render(&output, format)?);
    Ok(())
}
