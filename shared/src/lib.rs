//! Shared types for the HRMS backend
//!
//! Common types used across crates: domain models, the unified
//! error system, and id/time utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
