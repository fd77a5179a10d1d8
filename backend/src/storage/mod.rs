//! # Storage Layer
//!
//! Persistence for the finance tracker. `traits` defines the narrow
//! per-entity repository interfaces the domain layer depends on; `sqlite`
//! provides the concrete sqlx-backed implementation.

pub mod sqlite;
pub mod traits;

pub use sqlite::SqliteConnection;
pub use traits::*;
