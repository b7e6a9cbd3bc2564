//! Service container for dependency injection

use super::traits::{ConfigProvider, HttpTransport};
use crate::config::Config;
use crate::core::IndexResult;
use crate::releases::transport::ReqwestTransport;
use crate::releases::ReleaseAggregator;
use std::sync::Arc;

/// Service container for dependency injection
///
/// Holds the configuration and the HTTP transport behind trait objects so
/// tests can swap in mocks.
///
/// # Example (Production)
///
/// ```no_run
/// use release_index::config::Config;
/// use release_index::di::ServiceContainer;
///
/// # async fn example() -> release_index::core::IndexResult<()> {
/// let container = ServiceContainer::new(Config::default())?;
/// let catalog = container
///     .aggregator()?
///     .fetch_all(container.config().api_url())
///     .await?;
/// println!("{} releases", catalog.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ServiceContainer {
    pub config: Arc<dyn ConfigProvider>,
    pub transport: Arc<dyn HttpTransport>,
}

impl ServiceContainer {
    /// Create a new service container with the reqwest transport
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: Config) -> IndexResult<Self> {
        Ok(Self {
            config: Arc::new(config),
            transport: Arc::new(ReqwestTransport::new()?),
        })
    }

    /// Create a service container with custom provider implementations
    pub fn with_providers(
        config: Arc<dyn ConfigProvider>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self { config, transport }
    }

    /// Get the configuration provider
    pub fn config(&self) -> &dyn ConfigProvider {
        self.config.as_ref()
    }

    /// Get the HTTP transport
    pub fn transport(&self) -> Arc<dyn HttpTransport> {
        Arc::clone(&self.transport)
    }

    /// Build an aggregator using the configured page size
    pub fn aggregator(&self) -> IndexResult<ReleaseAggregator> {
        ReleaseAggregator::with_page_size(self.transport(), self.config.page_size())
    }
}
