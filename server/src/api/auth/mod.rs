//! Auth API Module

pub(crate) mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

/// Auth router; signup and login are public, `/me` requires a token
pub fn router() -> Router<ServerState> {
    Router::new().nest(
        "/api/v1/auth",
        Router::new()
            .route("/signup", post(handler::signup))
            .route("/login", post(handler::login))
            .route("/me", get(handler::me)),
    )
}
