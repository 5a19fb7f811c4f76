//! Processors: the units a packaging recipe runs.
//!
//! Each processor declares the variables it reads and writes, takes an
//! explicit input value and returns an explicit output value. Outputs
//! serialize to a flat object whose keys are the declared output names.

mod filemaker;
mod template;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

pub use filemaker::{
    FULL_INSTALLER_URL_TEMPLATE, FilemakerInput, FilemakerOutput, FilemakerUpdateUrl,
};
pub use template::{CHECKSUM_FILE_NAME, TemplateInput, TemplateOutput, TemplateVersioner};

/// A declared input or output variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableSpec {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// Static description of a processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessorInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub inputs: &'static [VariableSpec],
    pub outputs: &'static [VariableSpec],
}

#[async_trait]
pub trait Processor: Send + Sync {
    type Input: Send + Sync;
    type Output: Serialize + Send;

    fn info(&self) -> &'static ProcessorInfo;

    /// Run the processor. No output is produced on failure.
    async fn process(&self, input: &Self::Input) -> Result<Self::Output>;
}

/// Every processor shipped by this crate.
pub fn catalog() -> [&'static ProcessorInfo; 2] {
    [&filemaker::INFO, &template::INFO]
}

/// Look up a processor description by name.
pub fn find(name: &str) -> Option<&'static ProcessorInfo> {
    catalog().into_iter().find(|info| info.name == name)
}
