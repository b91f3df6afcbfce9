//! In-memory storage backend for development and testing.
//!
//! This module provides an in-memory implementation of `PatientRepository`
//! that emulates the single-table layout: items are addressed by the same
//! partition and sort keys the DynamoDB backend uses, and the name index is
//! emulated by a prefix scan over the tenant partition. Data is not persisted.
//!
//! # Example
//!
//! ```rust,ignore
//! use dentalcloud::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::InMemoryRepository;
