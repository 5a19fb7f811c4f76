//! Latest-update selection from an update feed.
//!
//! The feed mixes platforms, product families and release lines, and its
//! version strings are free-form (`19.1.2`, `18.0.3a`, `16.3v2`). Selection
//! narrows the records with the filters below and then picks the record with
//! the greatest [`VersionKey`].

mod key;

use anyhow::Result;
use log::debug;

use crate::error::ProcessorError;
use crate::feed::UpdateRecord;

pub use key::VersionKey;

/// Version selector - pure functions over slices of update records.
///
/// All methods are stateless; filters preserve the input order.
pub struct VersionSelector;

impl VersionSelector {
    /// Keep records published for `platform` (exact match, e.g. "Mac").
    pub fn filter_by_platform(records: &[UpdateRecord], platform: &str) -> Vec<UpdateRecord> {
        records
            .iter()
            .filter(|r| r.platform == platform)
            .cloned()
            .collect()
    }

    /// Drop records whose product name contains `pattern` (case-sensitive).
    pub fn filter_excluding_product_pattern(
        records: &[UpdateRecord],
        pattern: &str,
    ) -> Vec<UpdateRecord> {
        records
            .iter()
            .filter(|r| !r.product.contains(pattern))
            .cloned()
            .collect()
    }

    /// Keep records whose raw version string starts with `major_version`.
    ///
    /// This is a string prefix test: "1" also keeps "19.0.1".
    pub fn filter_by_major_version_prefix(
        records: &[UpdateRecord],
        major_version: &str,
    ) -> Vec<UpdateRecord> {
        records
            .iter()
            .filter(|r| r.version.starts_with(major_version))
            .cloned()
            .collect()
    }

    /// Parse a version string into a comparable key.
    pub fn parse_version_key(version: &str) -> Result<VersionKey> {
        Ok(VersionKey::parse(version)?)
    }

    /// Return the record with the greatest version key.
    ///
    /// Ties go to the record that appears first. Fails with
    /// [`ProcessorError::NoCandidates`] on empty input.
    pub fn select_latest(records: &[UpdateRecord]) -> Result<&UpdateRecord> {
        let mut best: Option<(VersionKey, &UpdateRecord)> = None;

        for record in records {
            let key = VersionKey::parse(&record.version)?;
            debug!("{} -> {}", record.version, key);
            if best.as_ref().is_none_or(|(top, _)| key > *top) {
                best = Some((key, record));
            }
        }

        let (key, _) = best.ok_or(ProcessorError::NoCandidates)?;

        // Re-derive the winner from its key; fires only if parsing is not deterministic.
        records
            .iter()
            .find(|r| VersionKey::parse(&r.version).is_ok_and(|k| k == key))
            .ok_or_else(|| ProcessorError::SelectionMismatch(key.to_string()).into())
    }
}
