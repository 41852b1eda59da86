//! Utility modules

pub mod logger;
pub mod validation;

pub use logger::init_logger;
pub use validation::validate_payload;

// Re-export the unified error types for handler signatures
pub use shared::error::{AppError, AppResult, ErrorCode};
