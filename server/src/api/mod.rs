//! API route modules
//!
//! One module per resource, each exposing a `router()` merged into the
//! application in [`crate::core::server::build_app`].
//!
//! - [`health`] - public health check
//! - [`auth`] - signup, login, current identity
//! - [`employees`] - employee directory
//! - [`attendance`] - daily attendance marking and history

pub mod attendance;
pub mod auth;
pub mod employees;
pub mod health;
