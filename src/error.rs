//! Error kinds raised by the processors.
//!
//! Every failure is terminal for the current invocation. Errors travel as
//! `anyhow::Error`; callers recover the kind with `downcast_ref::<ProcessorError>()`.

/// Domain errors that stop a processor run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessorError {
    /// No update record survived the filters.
    NoCandidates,
    /// A patch component ended in a letter outside the a-d table.
    UnrecognizedVersionSuffix { version: String, suffix: String },
    /// The highest parsed key does not map back to any input record.
    SelectionMismatch(String),
    /// The update feed could not be fetched or decoded.
    FetchFailure(String),
    /// The download URL carries no four-component version.
    VersionPatternNotFound(String),
    /// Save mode was requested without a checksum to save.
    ChecksumMissing,
}

impl std::fmt::Display for ProcessorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessorError::NoCandidates => {
                write!(f, "No update candidates left after filtering the feed")
            }
            ProcessorError::UnrecognizedVersionSuffix { version, suffix } => {
                write!(
                    f,
                    "Unrecognized version suffix '{}' in version '{}'",
                    suffix, version
                )
            }
            ProcessorError::SelectionMismatch(version) => {
                write!(
                    f,
                    "Selected version {} does not match any update record",
                    version
                )
            }
            ProcessorError::FetchFailure(msg) => {
                write!(f, "Can't get to the update feed: {}", msg)
            }
            ProcessorError::VersionPatternNotFound(url) => {
                write!(f, "Could not match a full version in update URL: {}", url)
            }
            ProcessorError::ChecksumMissing => write!(f, "checksum missing"),
        }
    }
}

impl std::error::Error for ProcessorError {}

/// Returns the processor error kind carried by an `anyhow::Error`, if any.
pub fn kind_of(err: &anyhow::Error) -> Option<&ProcessorError> {
    err.chain().find_map(|e| e.downcast_ref::<ProcessorError>())
}
