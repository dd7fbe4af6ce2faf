//! Route definitions for the Lifeline HTTP API.
//!
//! Domain routes are mounted under `/api`; the health check sits at the root.

use axum::Router;
use axum::routing::{get, post, put};

use crate::handlers;
use crate::state::AppState;

/// Build the router with all routes, threading `state` through every handler.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(checkin_routes())
        .merge(settings_routes())
        .merge(contact_routes())
        .merge(monitor_routes());

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(handlers::health::health))
        .with_state(state)
}

/// Check-in recording and statistics
fn checkin_routes() -> Router<AppState> {
    Router::new()
        .route("/checkin", post(handlers::checkin::check_in))
        .route("/checkin/stats", get(handlers::checkin::stats))
        .route("/checkin/last", get(handlers::checkin::last))
        .route("/checkin/today", get(handlers::checkin::today))
        .route("/checkin/history", get(handlers::checkin::history))
}

/// Per-user notification settings
fn settings_routes() -> Router<AppState> {
    Router::new().route(
        "/settings",
        get(handlers::settings::get_settings).put(handlers::settings::update_settings),
    )
}

/// Emergency contact CRUD
fn contact_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/contacts",
            get(handlers::contact::list_contacts).post(handlers::contact::create_contact),
        )
        .route(
            "/contacts/{id}",
            put(handlers::contact::update_contact).delete(handlers::contact::delete_contact),
        )
}

/// Manual evaluation trigger
fn monitor_routes() -> Router<AppState> {
    Router::new().route("/monitor/check", post(handlers::monitor::check))
}
