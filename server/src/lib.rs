//! HRMS backend server
//!
//! Employee records, role-based permissions and daily attendance
//! marking behind a JWT-guarded REST API.
//!
//! # Module structure
//!
//! ```text
//! server/src/
//! ├── core/       # config, state, server, background tasks
//! ├── auth/       # JWT, guard chain, permissions, password hashing
//! ├── db/         # pool, migrations, seeding, repositories
//! ├── api/        # HTTP routes and handlers
//! ├── services/   # background services (health probe)
//! └── utils/      # logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState, build_app, build_router};
pub use utils::{AppError, AppResult, ErrorCode, init_logger};

// Security logging macro, supports tracing format specifiers
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
    __  ______  __  ________
   / / / / __ \/  |/  / ___/
  / /_/ / /_/ / /|_/ /\__ \
 / __  / _, _/ /  / /___/ /
/_/ /_/_/ |_/_/  /_//____/
    "#
    );
}
