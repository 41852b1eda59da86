//! Attendance API Module

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/v1/attendance", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::roster_for_date))
        .route("/{employee_id}", get(handler::history));

    let write_routes = Router::new()
        .route("/", post(handler::mark))
        .layer(middleware::from_fn(require_permission("attendance:write")));

    read_routes.merge(write_routes)
}
