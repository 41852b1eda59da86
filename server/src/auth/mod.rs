//! Authentication and authorization
//!
//! - [`JwtService`] - token issuance and verification
//! - [`CurrentUser`] - authenticated user context
//! - [`require_auth`] - authentication middleware
//! - [`require_permission`] - permission check middleware

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, JwtError, JwtService};
pub use middleware::{CurrentUser, require_auth, require_permission};
pub use password::{hash_password, verify_password};
