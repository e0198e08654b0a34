//! Object store (MinIO) integration
//!
//! This module validates the `[minio]` settings and holds the HTTP client used
//! to reach the object store.

pub mod client;

pub use client::ObjectStoreClient;
