//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domains::auth::TokenService;
use crate::kernel::{CredentialStore, ProfileNotifier};
use crate::server::routes::{health_handler, login_handler, root_handler};

/// Shared application state
///
/// The store and notifier sit behind trait objects so tests can run the full
/// router against in-memory implementations. `profiles` is `None` when no
/// profile collaborator is configured; registration then skips the call-out.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CredentialStore>,
    pub profiles: Option<Arc<dyn ProfileNotifier>>,
    pub tokens: Arc<TokenService>,
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        .route("/", get(root_handler))
        .route("/auth/login", post(login_handler))
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
