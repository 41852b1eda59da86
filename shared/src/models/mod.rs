//! Data models
//!
//! Shared between the server and API consumers.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod attendance;
pub mod employee;
pub mod role;

// Re-exports
pub use attendance::*;
pub use employee::*;
pub use role::*;
