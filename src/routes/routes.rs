//! Defines routes for the bug tracker.
//!
//! ## Structure
//! - `GET  /`                — list all bugs
//! - `GET  /register_bug/`   — empty register form
//! - `POST /register_bug/`   — submit a new bug
//! - `GET  /bug/{id}/`       — bug detail
//! - `GET  /healthz`, `GET /readyz` — probes

use crate::{
    handlers::{
        bug_handlers::{index, register_bug_form, register_bug_submit, view_bug},
        health_handlers::{healthz, readyz},
    },
    state::AppState,
};
use axum::{Router, routing::get};

/// Build the router. Every handler receives the shared `AppState`.
pub fn routes() -> Router<AppState> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/", get(index))
        .route(
            "/register_bug/",
            get(register_bug_form).post(register_bug_submit),
        )
        .route("/bug/{id}/", get(view_bug))
}
