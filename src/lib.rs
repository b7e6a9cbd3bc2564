//! Release index builder
//!
//! Drains a cursor-paginated releases metadata API, orders every release by
//! semantic version (newest first) and writes the result as a static index
//! file. Core types (errors, versions, paths) live in `release-index-core`
//! and are re-exported here.

pub use release_index_core::{IndexError, IndexResult, Version};

/// Core module re-exported from release-index-core.
pub mod core {
    pub use release_index_core::core::*;

    /// Path helpers re-exported from release-index-core.
    pub mod path {
        pub use release_index_core::core::path::*;
    }
}

/// Configuration management.
pub mod config;

/// Dependency injection infrastructure.
pub mod di;

/// Releases metadata API client and aggregation.
pub mod releases;

/// Index file output.
pub mod index;
