use crate::core::error::{IndexError, IndexResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A semantic version as published by the releases API.
///
/// Accepts a leading `v`, and one to three numeric components (missing
/// components default to zero), so `1.2` parses as `1.2.0`.
#[derive(Debug, Clone)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    /// Pre-release version (e.g., "alpha.1", "beta2", "rc1")
    pub prerelease: Option<String>,
    /// Build metadata (e.g., "ent", "build.123")
    pub build_metadata: Option<String>,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
            build_metadata: None,
        }
    }

    /// Create a new version with pre-release metadata
    pub fn with_prerelease(major: u64, minor: u64, patch: u64, prerelease: String) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: Some(prerelease),
            build_metadata: None,
        }
    }

    /// Parse a version string (e.g., "1.2.3", "v1.2.3", "1.2.3-alpha.1", "1.2.3+ent", "1.2.3-rc.1+build.456")
    pub fn parse(s: &str) -> IndexResult<Self> {
        let trimmed = s.trim();
        let body = trimmed.strip_prefix('v').unwrap_or(trimmed);

        if body.is_empty() {
            return Err(IndexError::Version(format!("Invalid version format: '{}'", s)));
        }

        let (version_prerelease, build_metadata) = match body.split_once('+') {
            Some((head, build)) => {
                validate_identifiers(s, build, "build metadata")?;
                (head, Some(build.to_string()))
            }
            None => (body, None),
        };

        // The first '-' starts the pre-release; identifiers may contain further dashes.
        let (numbers, prerelease) = match version_prerelease.split_once('-') {
            Some((head, pre)) => {
                validate_identifiers(s, pre, "pre-release")?;
                (head, Some(pre.to_string()))
            }
            None => (version_prerelease, None),
        };

        let parts: Vec<&str> = numbers.split('.').collect();
        if parts.len() > 3 {
            return Err(IndexError::Version(format!(
                "Too many version components: '{}'",
                s
            )));
        }

        let component = |idx: usize, name: &str| -> IndexResult<u64> {
            match parts.get(idx) {
                None => Ok(0),
                Some(raw) if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) => raw
                    .parse()
                    .map_err(|_| IndexError::Version(format!("Invalid {} version: '{}'", name, s))),
                Some(_) => Err(IndexError::Version(format!(
                    "Invalid {} version: '{}'",
                    name, s
                ))),
            }
        };

        Ok(Self {
            major: component(0, "major")?,
            minor: component(1, "minor")?,
            patch: component(2, "patch")?,
            prerelease,
            build_metadata,
        })
    }

    /// Whether this version carries a pre-release tag.
    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }
}

/// Dot-separated identifiers must be non-empty and limited to `[0-9A-Za-z-]`.
fn validate_identifiers(original: &str, identifiers: &str, what: &str) -> IndexResult<()> {
    let valid = identifiers.split('.').all(|ident| {
        !ident.is_empty() && ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    if valid {
        Ok(())
    } else {
        Err(IndexError::Version(format!(
            "Invalid {} in version: '{}'",
            what, original
        )))
    }
}

impl FromStr for Version {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

// Build metadata does not take part in equality or precedence.
impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch)) {
            Ordering::Equal => match (&self.prerelease, &other.prerelease) {
                (None, None) => Ordering::Equal,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(a), Some(b)) => compare_prerelease_identifiers(a, b),
            },
            other => other,
        }
    }
}

/// Compare pre-release identifiers according to SemVer precedence
fn compare_prerelease_identifiers(a: &str, b: &str) -> Ordering {
    let a_parts: Vec<&str> = a.split('.').collect();
    let b_parts: Vec<&str> = b.split('.').collect();

    for (a_part, b_part) in a_parts.iter().zip(b_parts.iter()) {
        let ordering = match (numeric_identifier(a_part), numeric_identifier(b_part)) {
            (Some(a_num), Some(b_num)) => a_num.cmp(&b_num),
            (Some(_), None) => Ordering::Less, // Numeric < alphanumeric
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a_part.cmp(b_part),
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    // A larger set of identifiers wins when all shared ones are equal
    a_parts.len().cmp(&b_parts.len())
}

fn numeric_identifier(ident: &str) -> Option<u64> {
    if ident.chars().all(|c| c.is_ascii_digit()) {
        ident.parse().ok()
    } else {
        None
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(ref pre) = self.prerelease {
            write!(f, "-{}", pre)?;
        }
        if let Some(ref build) = self.build_metadata {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Version::parse(&raw).map_err(serde::de::Error::custom)
    }
}
