//! Comparable keys parsed from free-form update version strings.

use std::fmt;

use crate::error::ProcessorError;

/// Letter codes FileMaker appends to a patch number, in release order.
const PATCH_LETTERS: [(&str, u64); 4] = [("a", 1), ("b", 2), ("c", 3), ("d", 4)];

/// Marker separating a minor number from its sub-revision (e.g. "3v2").
const REVISION_MARKER: char = 'v';

/// Parsed form of a version string such as `19.1.2`, `18.0.3a` or `16.3v2.1`.
///
/// Field order is significant: the derived ordering compares
/// `(major, minor, patch, build)` lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct VersionKey {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub build: u64,
}

impl VersionKey {
    /// Parse a version string into its key.
    ///
    /// Components that are not plain integers count as 0. A trailing letter on
    /// the patch component must be one of `a`-`d`, otherwise the version is
    /// rejected with [`ProcessorError::UnrecognizedVersionSuffix`]. A `v`
    /// revision on the minor component takes precedence over a patch letter.
    pub fn parse(version: &str) -> Result<Self, ProcessorError> {
        let mut parts = version.split('.');
        let major = lenient_number(parts.next().unwrap_or_default());
        let (minor, revision) = split_minor(parts.next().unwrap_or_default());
        let (patch, letter_build) = split_patch(version, parts.next().unwrap_or("0"))?;

        Ok(VersionKey {
            major,
            minor,
            patch,
            build: revision.unwrap_or(letter_build),
        })
    }
}

impl fmt::Display for VersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.patch, self.build
        )
    }
}

fn lenient_number(component: &str) -> u64 {
    component.parse().unwrap_or(0)
}

/// Splits `3v2` into `(3, Some(2))`; a component without the marker has no revision.
fn split_minor(component: &str) -> (u64, Option<u64>) {
    match component.split_once(REVISION_MARKER) {
        Some((minor, revision)) => (lenient_number(minor), Some(lenient_number(revision))),
        None => (lenient_number(component), None),
    }
}

/// Splits `3a` into `(3, 1)`: leading digits, then an optional letter code.
fn split_patch(version: &str, component: &str) -> Result<(u64, u64), ProcessorError> {
    let digits_end = component
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(component.len());
    let (digits, suffix) = component.split_at(digits_end);
    let patch = lenient_number(digits);

    if suffix.is_empty() {
        return Ok((patch, 0));
    }

    PATCH_LETTERS
        .iter()
        .find(|(letter, _)| *letter == suffix)
        .map(|(_, build)| (patch, *build))
        .ok_or_else(|| ProcessorError::UnrecognizedVersionSuffix {
            version: version.to_string(),
            suffix: suffix.to_string(),
        })
}
