//! PostgreSQL database integration
//!
//! This module turns the resolved `[pg]` configuration into a live session.

pub mod client;
pub mod params;
pub mod pgpass;

pub use client::PostgreSQLClient;
pub use params::{PgConnectParams, PgTlsConfig};
pub use pgpass::PgPass;
