//! Social server library - espone i moduli principali per i test

pub mod core;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod services;

// Re-export dei tipi principali per facilitare l'import
pub use crate::core::{AppError, AppState, auth, config};
pub use services::root;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Crea il router principale dell'applicazione
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/api/v1", configure_api_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn configure_api_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .nest("/auth", configure_auth_routes())
        .nest("/friend", configure_friend_routes(state))
}

/// Configura le routes di autenticazione (login, register)
fn configure_auth_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/login", post(login_user))
        .route("/register", post(register_user))
}

/// Configura le routes per inviti di amicizia e lista amici (richiedono autenticazione)
fn configure_friend_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/invite/send", post(send_friend_invite))
        .route("/invite/accept", put(accept_friend_invite))
        .route("/invite/reject", put(reject_friend_invite))
        .route("/invite/pending", get(list_pending_invites))
        .route("/invite/sent", get(list_sent_invites))
        .route("/list", get(list_friends))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}
