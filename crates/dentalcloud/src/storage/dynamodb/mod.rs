//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of `PatientRepository`
//! using `aws-sdk-dynamodb`. The table is expected to exist with:
//!
//! - partition key `_pk` (S) and sort key `_sk` (S)
//! - a global secondary index `name-index` on `_pk` (S) / `st` (S) projecting
//!   `pid, fn, mn, ln, e, mp, dob, pc`

mod conversions;
mod error;
mod repository;

pub use repository::DynamoDbRepository;
