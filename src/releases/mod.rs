//! Releases metadata API client
//!
//! This module provides functionality for:
//! - Decoding release records and their builds
//! - Fetching single pages over a pluggable HTTP transport
//! - Draining the paginated endpoint into a version-ordered catalog

pub mod aggregator;
pub mod fetcher;
pub mod transport;
pub mod types;

pub use aggregator::{FetchSummary, ReleaseAggregator, DEFAULT_PAGE_SIZE};
pub use fetcher::{PageFetcher, PageQuery};
pub use transport::ReqwestTransport;
pub use types::{Build, ReleaseCatalog, ReleaseRecord};
