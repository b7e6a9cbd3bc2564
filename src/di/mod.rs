//! Dependency injection infrastructure
//!
//! The HTTP transport and configuration are reached through traits so the
//! fetch loop can run against scripted responses in tests.
//!
//! # Example (Testing)
//! ```
//! use release_index::di::{ConfigProvider, ServiceContainer, mocks::*};
//! use std::sync::Arc;
//!
//! let config = Arc::new(MockConfigProvider::default());
//! let transport = Arc::new(MockTransport::new());
//!
//! let container = ServiceContainer::with_providers(config, transport);
//! assert_eq!(container.config().page_size(), 20);
//! ```

pub mod container;
pub mod mocks;
pub mod traits;

// Re-export key types
pub use container::ServiceContainer;
pub use traits::{ConfigProvider, HttpResponse, HttpTransport};
