//! Command-line entry points, one per processor.

pub mod config;
mod describe;
mod filemaker;
mod output;
mod template;

pub use describe::describe;
pub use filemaker::filemaker_url;
pub use output::{OutputFormat, render};
pub use template::{TemplateOptions, template_version};
