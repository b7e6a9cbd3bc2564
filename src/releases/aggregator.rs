//! Drains the paginated releases endpoint into a version-ordered catalog

use crate::core::{IndexError, IndexResult};
use crate::di::traits::HttpTransport;
use crate::releases::fetcher::{parse_base_url, PageFetcher, PageQuery};
use crate::releases::types::{format_timestamp, ReleaseCatalog, ReleaseRecord};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Releases requested per page unless configured otherwise
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Bookkeeping from one `fetch_all` run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchSummary {
    /// Requests made, including a trailing empty page
    pub pages: usize,
    /// Releases in the resulting catalog
    pub records: usize,
    /// Releases served again at a page boundary and skipped
    pub duplicates_dropped: usize,
}

/// Pages through the releases endpoint and aggregates every release
///
/// Pages are requested strictly one after another: each request carries the
/// creation timestamp of the previous page's last release as its `after`
/// cursor. A page shorter than the page size ends the run. Any failure
/// aborts the run and no partial catalog is returned.
pub struct ReleaseAggregator {
    fetcher: PageFetcher,
    page_size: usize,
}

impl ReleaseAggregator {
    /// Create an aggregator using [`DEFAULT_PAGE_SIZE`]
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            fetcher: PageFetcher::new(transport),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Create an aggregator with a custom page size
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `page_size` is zero, since an empty
    /// page could then never be told apart from a full one.
    pub fn with_page_size(transport: Arc<dyn HttpTransport>, page_size: usize) -> IndexResult<Self> {
        if page_size == 0 {
            return Err(IndexError::Config(
                "page_size must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            fetcher: PageFetcher::new(transport),
            page_size,
        })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Fetch every release from `base_url`, sorted by version, newest first
    pub async fn fetch_all(&self, base_url: &str) -> IndexResult<ReleaseCatalog> {
        let (catalog, _) = self.fetch_all_with_summary(base_url).await?;
        Ok(catalog)
    }

    /// Like [`fetch_all`](Self::fetch_all), also reporting what the run did
    pub async fn fetch_all_with_summary(
        &self,
        base_url: &str,
    ) -> IndexResult<(ReleaseCatalog, FetchSummary)> {
        let url = parse_base_url(base_url)?;

        let mut accumulated: Vec<ReleaseRecord> = Vec::new();
        let mut seen: HashSet<(String, DateTime<Utc>)> = HashSet::new();
        let mut summary = FetchSummary::default();
        let mut query = PageQuery::first(self.page_size);

        loop {
            let page = self.fetcher.fetch_url(&url, &query).await?;
            summary.pages += 1;

            check_page_order(summary.pages, &page)?;

            let page_len = page.len();
            let next_cursor = page.last().map(ReleaseRecord::cursor);

            for record in page {
                // `after` may be inclusive, re-serving the release the cursor came from.
                if seen.insert((record.version.to_string(), record.created_at)) {
                    accumulated.push(record);
                } else {
                    warn!(
                        version = %record.version,
                        created = %format_timestamp(&record.created_at),
                        "Skipping release served twice across a page boundary"
                    );
                    summary.duplicates_dropped += 1;
                }
            }

            if page_len > self.page_size {
                warn!(
                    received = page_len,
                    limit = self.page_size,
                    "Page larger than requested limit, treating as the last page"
                );
            }

            match next_cursor {
                Some(cursor) if page_len == self.page_size => {
                    if query.after.as_deref() == Some(cursor.as_str()) {
                        return Err(IndexError::CursorStalled { cursor });
                    }
                    debug!(page = summary.pages, cursor = %cursor, "Page full, requesting next");
                    query = PageQuery::after(self.page_size, cursor);
                }
                _ => break,
            }
        }

        // Stable: releases sharing a version keep their fetch order.
        accumulated.sort_by(|a, b| b.version.cmp(&a.version));

        summary.records = accumulated.len();
        info!(
            releases = summary.records,
            pages = summary.pages,
            duplicates = summary.duplicates_dropped,
            "Fetched release catalog"
        );

        Ok((ReleaseCatalog::from_sorted(accumulated), summary))
    }
}

/// Releases within a page must be listed newest first.
fn check_page_order(page_number: usize, page: &[ReleaseRecord]) -> IndexResult<()> {
    for (position, pair) in page.windows(2).enumerate() {
        if pair[1].created_at > pair[0].created_at {
            return Err(IndexError::OrderingViolation {
                page: page_number,
                position: position + 1,
                previous: format_timestamp(&pair[0].created_at),
                current: format_timestamp(&pair[1].created_at),
            });
        }
    }
    Ok(())
}
