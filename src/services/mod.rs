//! Services module - Coordinatore per tutti i service handler HTTP
//!
//! Ogni modulo gestisce gli endpoint HTTP per una specifica funzionalità.

pub mod auth;
pub mod friend;

// Re-exports per facilitare l'import
pub use auth::{login_user, register_user};
pub use friend::{
    accept_friend_invite, list_friends, list_pending_invites, list_sent_invites,
    reject_friend_invite, send_friend_invite,
};

use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

/// Root endpoint - health check
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}
