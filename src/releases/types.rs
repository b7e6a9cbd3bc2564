//! Release metadata types as served by the releases API

use crate::core::Version;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One downloadable artifact of a release. Passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    pub arch: String,
    pub os: String,
    pub url: String,
}

/// A single published release
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseRecord {
    pub builds: Vec<Build>,
    pub is_prerelease: bool,
    /// Creation time; only used to position the pagination cursor.
    #[serde(rename = "timestamp_created", with = "timestamp")]
    pub created_at: DateTime<Utc>,
    pub version: Version,
}

impl ReleaseRecord {
    /// Cursor value that asks the API for releases created before this one.
    ///
    /// Rendered from the parsed time at millisecond precision, not echoed
    /// from the server's string. If the API stores sub-millisecond
    /// timestamps, releases created between the truncated cursor and the
    /// exact one can be skipped.
    pub fn cursor(&self) -> String {
        format_timestamp(&self.created_at)
    }
}

/// All releases of a product, ordered by version, newest first
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ReleaseCatalog {
    records: Vec<ReleaseRecord>,
}

impl ReleaseCatalog {
    /// Wrap records that are already in catalog order.
    pub(crate) fn from_sorted(records: Vec<ReleaseRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReleaseRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[ReleaseRecord] {
        &self.records
    }

    /// Version strings in catalog order
    pub fn versions(&self) -> Vec<String> {
        self.records.iter().map(|r| r.version.to_string()).collect()
    }

    pub fn into_records(self) -> Vec<ReleaseRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a ReleaseCatalog {
    type Item = &'a ReleaseRecord;
    type IntoIter = std::slice::Iter<'a, ReleaseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Timestamps are exchanged as RFC 3339 UTC with millisecond precision,
/// e.g. `2021-08-20T17:47:05.000Z`.
pub(crate) mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{}': {}", raw, e)))
    }
}

/// Render a timestamp the way the index file and cursor do.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    timestamp::format(ts)
}
