//! Storage backend implementations.
//!
//! This module provides concrete implementations of the `PatientRepository`
//! trait defined in `dentalcloud_core::storage`, and the [`PatientStore`]
//! built on top of it. The backend is selected at compile time via feature
//! flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): in-process emulation of the single table
//! - `dynamodb`: AWS DynamoDB storage backend using `aws-sdk-dynamodb`
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time.
//!
//! # Examples
//!
//! Build with the in-memory backend (default):
//! ```bash
//! cargo build -p dentalcloud
//! ```
//!
//! Build with DynamoDB:
//! ```bash
//! cargo build -p dentalcloud --no-default-features --features dynamodb
//! ```

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "inmemory", feature = "dynamodb"))]
compile_error!(
    "Features 'inmemory' and 'dynamodb' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'dynamodb' feature. \
    Example: cargo build -p dentalcloud --features dynamodb"
);

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(any(feature = "inmemory", test))]
pub mod inmemory;

mod store;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbRepository;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryRepository;

pub use store::PatientStore;
