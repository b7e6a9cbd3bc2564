//! Integration tests module
//!
//! Runs the release-index binary against a local mock releases API.

mod common;
mod config;
mod fetch;
