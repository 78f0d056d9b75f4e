//! Storage layer
//!
//! Uses SQLite (embedded); the schema is created idempotently at startup.

pub mod db;

pub use db::{Database, StorageError};
