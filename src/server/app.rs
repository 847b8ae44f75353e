//! Axum application setup
//!
//! Creates and configures the Axum application with routes and middleware.

use super::{guard::GuestGuard, handlers};
use crate::config::Settings;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Application state shared across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
    /// Guest-only page guard
    pub guard: GuestGuard,
}

impl AppState {
    /// Build state from settings
    pub fn new(settings: &Settings) -> Self {
        Self {
            guard: GuestGuard::from_settings(&settings),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Create the main Axum application with routes and middleware
pub fn create_app(settings: Settings) -> Router {
    let enable_cors = settings.server.enable_cors;
    let state = AppState::new(&settings);

    let guest_only = Router::new()
        .route("/signup", get(handlers::signup))
        .route_layer(middleware::from_fn_with_state(
            state.guard.clone(),
            super::guard::redirect_authenticated,
        ));

    let router = Router::new()
        .route("/", get(handlers::home))
        .route("/login", get(handlers::login))
        .route("/ping", get(handlers::ping))
        .route("/cpf/validate", post(handlers::validate_cpf))
        .merge(guest_only)
        .with_state(state);

    let router = if enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.layer(TraceLayer::new_for_http())
}
