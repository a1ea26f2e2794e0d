//! Axum router construction.
//!
//! Assembles all routes into a single [`Router`] with CORS and request
//! tracing enabled.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// See [`handlers`] for the endpoint table. CORS allows any origin so the
/// mobile web client can be served from anywhere during the festival.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/venues", get(handlers::list_venues))
        .route("/api/symbols", get(handlers::list_symbols))
        // Players
        .route("/api/users", post(handlers::register_user))
        .route("/api/users/{id}", get(handlers::get_user))
        .route("/api/users/{id}/profile", put(handlers::update_profile))
        .route("/api/users/{id}/scan", post(handlers::scan_tag))
        .route("/api/users/{id}/slots/spin", post(handlers::spin_slots))
        .route(
            "/api/users/{id}/visibility/toggle",
            post(handlers::toggle_visibility),
        )
        .route("/api/users/{id}/visited", get(handlers::visited_venues))
        // Lore
        .route(
            "/api/users/{id}/lore",
            get(handlers::list_lore).post(handlers::add_lore),
        )
        .route(
            "/api/users/{id}/lore/{lore_id}/unlock",
            post(handlers::unlock_lore),
        )
        // Friends
        .route("/api/users/{id}/discover", get(handlers::discover_users))
        .route(
            "/api/users/{id}/friends/{friend_id}/accept",
            post(handlers::accept_friend),
        )
        .route(
            "/api/users/{id}/friends/{friend_id}/request",
            post(handlers::send_request),
        )
        .route("/api/users/{id}/ledger", get(handlers::ledger))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
