use std::{sync::Arc, time::Duration};

use crate::{config::Config, storage::PatientStore};

/// Shared application state.
///
/// This is cloned for each request handler. The store owns the storage
/// backend selected at compile time.
#[derive(Clone)]
pub struct AppState {
    /// Patient store over the configured backend.
    pub store: Arc<PatientStore>,
    /// Upper bound on the time a request may take.
    pub request_timeout: Duration,
}

impl AppState {
    fn build(store: PatientStore, config: &Config) -> Self {
        Self {
            store: Arc::new(store),
            request_timeout: config.request_timeout(),
        }
    }
}

// ============================================================================
// Factory functions for each storage backend
// ============================================================================

#[cfg(feature = "inmemory")]
mod inmemory_backend {
    use super::*;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with the in-memory backend.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repository = Arc::new(InMemoryRepository::new());

            tracing::info!("Using in-memory storage");

            Ok(Self::build(
                PatientStore::new(repository, config.retry_policy()),
                config,
            ))
        }
    }
}

#[cfg(feature = "dynamodb")]
mod dynamodb_backend {
    use super::*;
    use crate::storage::DynamoDbRepository;

    impl AppState {
        /// Creates AppState with DynamoDB storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repository = Arc::new(DynamoDbRepository::from_config(config).await);

            tracing::info!(table = %repository.table_name(), "Using DynamoDB storage");

            Ok(Self::build(
                PatientStore::new(repository, config.retry_policy()),
                config,
            ))
        }
    }
}

#[cfg(test)]
mod test_backend {
    use super::*;
    use crate::storage::inmemory::InMemoryRepository;
    use dentalcloud_core::storage::RetryPolicy;

    impl Default for AppState {
        /// Creates an AppState with in-memory storage for testing.
        ///
        /// Retries are disabled.
        fn default() -> Self {
            let config = Config::default();
            let store = PatientStore::new(Arc::new(InMemoryRepository::new()), RetryPolicy::none());

            Self::build(store, &config)
        }
    }
}
