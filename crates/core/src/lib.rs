//! Core for the dentalcloud patients service.
//!
//! Pure domain types and storage contracts. Nothing in this crate performs
//! I/O; backends and the HTTP surface live in the `dentalcloud` crate.

pub mod patient;
pub mod serde;
pub mod storage;
