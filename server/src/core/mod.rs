//! Core module: configuration, state, server, background tasks
//!
//! - [`Config`] - environment configuration
//! - [`ServerState`] - shared state (pool, JWT service)
//! - [`Server`] - HTTP server
//! - [`BackgroundTasks`] - background task manager

pub mod config;
pub mod server;
pub mod state;
pub mod tasks;

pub use config::Config;
pub use server::{Server, build_app, build_router};
pub use state::ServerState;
pub use tasks::BackgroundTasks;
