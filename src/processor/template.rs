use anyhow::{Context, Result};
use async_trait::async_trait;
use glob::Pattern;
use log::{debug, info};
use md5::{Digest, Md5};
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::{Processor, ProcessorInfo, VariableSpec};
use crate::error::ProcessorError;
use crate::runtime::Runtime;

/// Name of the file, inside the recipe cache directory, holding the last checksum.
pub const CHECKSUM_FILE_NAME: &str = "checksum";

pub(super) static INFO: ProcessorInfo = ProcessorInfo {
    name: "template-version",
    description: "Provides a version number for a directory of templates",
    inputs: &[
        VariableSpec {
            name: "mount_point",
            required: true,
            description: "Directory containing the templates",
        },
        VariableSpec {
            name: "file_exclusions",
            required: false,
            description: "File name globs to ignore in the checksum",
        },
        VariableSpec {
            name: "save_checksum",
            required: false,
            description: "Write the given checksum to the recipe cache",
        },
        VariableSpec {
            name: "checksum",
            required: false,
            description: "Latest checksum of the template directory",
        },
    ],
    outputs: &[
        VariableSpec {
            name: "version",
            required: false,
            description: "Date-based version number",
        },
        VariableSpec {
            name: "stop_processing",
            required: false,
            description: "True when the templates are unchanged since the saved checksum",
        },
        VariableSpec {
            name: "checksum",
            required: false,
            description: "Latest directory checksum",
        },
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemplateInput {
    pub mount_point: PathBuf,
    pub file_exclusions: Vec<String>,
    pub save_checksum: bool,
    pub checksum: Option<String>,
    pub cache_dir: PathBuf,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TemplateOutput {
    pub version: String,
    pub checksum: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_processing: Option<bool>,
}

/// Versions a template directory by date and detects changes by checksum.
pub struct TemplateVersioner<R: Runtime> {
    runtime: R,
}

impl<R: Runtime> TemplateVersioner<R> {
    pub fn new(runtime: R) -> Self {
        Self { runtime }
    }

    /// MD5 over the contents of every file under `root`, in path order.
    ///
    /// Files whose name matches one of `exclusions` are skipped.
    #[tracing::instrument(skip(self))]
    pub fn directory_checksum(&self, root: &Path, exclusions: &[String]) -> Result<String> {
        if !self.runtime.is_dir(root) {
            anyhow::bail!("Mount point {:?} is not a directory", root);
        }

        let patterns = exclusions
            .iter()
            .map(|p| {
                Pattern::new(p).with_context(|| format!("Invalid file exclusion pattern: {}", p))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut hasher = Md5::new();
        for path in self.runtime.walk_files(root)? {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            if let Some(pattern) = patterns.iter().find(|p| p.matches(&file_name)) {
                debug!(
                    "Excluding {} as it matches a file exclusion ({})",
                    file_name,
                    pattern.as_str()
                );
                continue;
            }

            hasher.update(self.runtime.read(&path)?);
        }

        Ok(format!("{:x}", hasher.finalize()))
    }

    /// Checksum saved by the last run, if any.
    fn saved_checksum(&self, cache_dir: &Path) -> Result<Option<String>> {
        let path = cache_dir.join(CHECKSUM_FILE_NAME);
        if !self.runtime.exists(&path) {
            return Ok(None);
        }
        let saved = self.runtime.read_to_string(&path)?;
        Ok(Some(saved.trim().to_string()))
    }

    fn save_checksum(&self, cache_dir: &Path, checksum: &str) -> Result<()> {
        self.runtime.create_dir_all(cache_dir)?;
        let path = cache_dir.join(CHECKSUM_FILE_NAME);
        debug!("Saving checksum {} to {:?}", checksum, path);
        self.runtime
            .write(&path, checksum.as_bytes())
            .context("Failed to update checksum file")
    }

    fn date_version(&self) -> String {
        format!("{}.0", self.runtime.today().format("%y%m%d"))
    }
}

#[async_trait]
impl<R: Runtime> Processor for TemplateVersioner<R> {
    type Input = TemplateInput;
    type Output = TemplateOutput;

    fn info(&self) -> &'static ProcessorInfo {
        &INFO
    }

    #[tracing::instrument(skip(self))]
    async fn process(&self, input: &TemplateInput) -> Result<TemplateOutput> {
        if input.save_checksum {
            let checksum = input.checksum.as_deref().ok_or(ProcessorError::ChecksumMissing)?;
            self.save_checksum(&input.cache_dir, checksum)?;
            return Ok(TemplateOutput {
                version: self.date_version(),
                checksum: checksum.to_string(),
                stop_processing: None,
            });
        }

        let new_checksum = self.directory_checksum(&input.mount_point, &input.file_exclusions)?;
        let old_checksum = self.saved_checksum(&input.cache_dir)?;
        info!("Old checksum: {}", old_checksum.as_deref().unwrap_or(""));
        info!("New checksum: {}", new_checksum);

        let unchanged = old_checksum.as_deref() == Some(new_checksum.as_str());
        if unchanged {
            info!("Templates unchanged, stopping recipe");
        }

        Ok(TemplateOutput {
            version: self.date_version(),
            checksum: new_checksum,
            stop_processing: Some(unchanged),
        })
    }
}
