//! Index file output
//!
//! Serializes a fetched catalog for downstream consumers. Only called after
//! a complete fetch, so a failed run never leaves a truncated index behind.

use crate::core::path::ensure_parent_dir;
use crate::core::IndexResult;
use crate::releases::types::{format_timestamp, ReleaseCatalog};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::info;

/// Shape of the written index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IndexFormat {
    /// Every release with its builds
    #[default]
    Full,
    /// Only the version strings plus a last-updated stamp
    Versions,
}

impl fmt::Display for IndexFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexFormat::Full => write!(f, "full"),
            IndexFormat::Versions => write!(f, "versions"),
        }
    }
}

/// Compact listing written by [`IndexFormat::Versions`]
#[derive(Debug, Serialize)]
struct VersionList {
    #[serde(rename = "LastUpdated")]
    last_updated: String,
    #[serde(rename = "Versions")]
    versions: Vec<String>,
}

/// Render the index document, indented by one space per level
pub fn render_index(
    catalog: &ReleaseCatalog,
    format: IndexFormat,
    now: DateTime<Utc>,
) -> IndexResult<Vec<u8>> {
    match format {
        IndexFormat::Full => to_indented_json(catalog),
        IndexFormat::Versions => to_indented_json(&VersionList {
            last_updated: format_timestamp(&now),
            versions: catalog.versions(),
        }),
    }
}

/// Write the index to `path`, creating parent directories as needed
pub fn write_index(path: &Path, catalog: &ReleaseCatalog, format: IndexFormat) -> IndexResult<()> {
    let content = render_index(catalog, format, Utc::now())?;
    ensure_parent_dir(path)?;
    fs::write(path, content)?;

    info!(
        path = %path.display(),
        format = %format,
        releases = catalog.len(),
        "Wrote release index"
    );
    Ok(())
}

fn to_indented_json<T: Serialize>(value: &T) -> IndexResult<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}
