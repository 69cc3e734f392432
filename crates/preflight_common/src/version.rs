//! Platform versions with lenient parsing, ordering, and display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A `major.minor.patch` platform version.
///
/// Parses from strings like `"2.16"`, `"2.16.1"`, and `"v3.0.0"`. Missing
/// components default to zero, and any pre-release or build suffix after
/// `-` or `+` is ignored, so `"3.0.0-ea.1"` compares equal to `"3.0.0"`.
/// Ordering is lexicographic over (major, minor, patch).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
}

impl Version {
    /// Creates a version from its three numeric components.
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Version({self})")
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Error type for parsing version strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid version: '{input}'")]
pub struct ParseVersionError {
    /// The input string that failed to parse.
    pub input: String,
}

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseVersionError {
            input: s.to_string(),
        };

        let bare = s
            .strip_prefix('v')
            .or_else(|| s.strip_prefix('V'))
            .unwrap_or(s);
        let core = bare.split(['-', '+']).next().unwrap_or_default();
        if core.is_empty() {
            return Err(err());
        }

        let mut parts = [0u64; 3];
        let mut count = 0;
        for segment in core.split('.') {
            if count == parts.len() || segment.is_empty() {
                return Err(err());
            }
            parts[count] = segment.parse().map_err(|_| err())?;
            count += 1;
        }

        Ok(Version::new(parts[0], parts[1], parts[2]))
    }
}

impl TryFrom<String> for Version {
    type Error = ParseVersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}
