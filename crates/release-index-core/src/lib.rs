//! Core types shared by the release-index library and binary.
//!
//! Holds the error taxonomy, the semantic version type used to order
//! releases, and platform path helpers.

pub mod core;

pub use crate::core::{BoxedCause, IndexError, IndexResult, Version};
