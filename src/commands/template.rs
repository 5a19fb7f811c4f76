use anyhow::Result;
use std::path::PathBuf;

use crate::processor::{Processor, TemplateInput, TemplateVersioner};
use crate::runtime::Runtime;

use super::config::resolve_cache_dir;
use super::output::{OutputFormat, render};

/// Options for the template versioner, as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct TemplateOptions {
    pub mount_point: PathBuf,
    pub file_exclusions: Vec<String>,
    pub save_checksum: bool,
    pub checksum: Option<String>,
    pub cache_dir: Option<PathBuf>,
}

/// Print a date version for a template directory and whether it changed.
#[tracing::instrument(skip(runtime))]
pub async fn template_version<R: Runtime>(
    runtime: R,
    options: TemplateOptions,
    format: OutputFormat,
) -> Result<()> {
    let cache_dir = resolve_cache_dir(&runtime, options.cache_dir)?;
    let input = TemplateInput {
        mount_point: options.mount_point,
        file_exclusions: options.file_exclusions,
        save_checksum: options.save_checksum,
        checksum: options.checksum,
        cache_dir,
    };

    let processor = TemplateVersioner::new(runtime);
    let output = processor.process(&input).await?;
    println!("{}", render(&output, format)?);
    Ok(())
}
