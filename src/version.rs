use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::ReleaseError;

/// Identifier naming a release, e.g. `v1.2.0` or `v0.1.0-alpha`.
///
/// Doubles as the stem of the message file that holds the commit/tag message
/// for that release. Wraps a [semver::Version]; the canonical rendering always
/// carries the leading `v`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionId(semver::Version);

/// Overall shape gate: leading `v`, three numeric components, optional
/// `-suffix`. Build metadata (`+...`) is deliberately not accepted because it
/// cannot appear in a tag name the workflow manages.
fn shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| Regex::new(r"^v\d+\.\d+\.\d+(-[0-9A-Za-z.\-]+)?$").unwrap())
}

impl VersionId {
    /// Name of the message resource for this version, e.g. `v1.2.0.txt`.
    pub fn file_name(&self) -> String {
        format!("{}.txt", self)
    }

    /// The underlying semantic version (without the `v` prefix).
    pub fn semver(&self) -> &semver::Version {
        &self.0
    }
}

impl FromStr for VersionId {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !shape().is_match(s) {
            return Err(ReleaseError::InvalidVersion(s.to_string()));
        }
        // The regex fixed the shape; semver validates the numeric core and
        // the pre-release identifiers (no leading zeros, etc).
        let version = semver::Version::parse(&s[1..])
            .map_err(|_| ReleaseError::InvalidVersion(s.to_string()))?;
        Ok(VersionId(version))
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}
