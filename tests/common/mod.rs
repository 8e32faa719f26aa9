#![allow(dead_code)]

use axum_test::TestServer;
use axum_test::http::{HeaderName, StatusCode};
use serde_json::{Value, json};
use social_server::core::AppState;
use social_server::repositories::MemoryStore;
use std::sync::Arc;

pub const JWT_SECRET: &str = "ilmiobellissimosegretochevaassolutamentecambiato";
pub const PASSWORD: &str = "Password123";

/// Crea un AppState in memoria per i test
///
/// # Returns
/// Lo stato condiviso e lo store sottostante, per ispezionare gli inviti salvati
pub fn create_test_state() -> (Arc<AppState>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::with_memory_store(store.clone(), JWT_SECRET.to_string());
    (Arc::new(state), store)
}

/// Crea un TestServer per i test
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = social_server::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Server e store pronti all'uso
pub fn setup() -> (TestServer, Arc<MemoryStore>) {
    let (state, store) = create_test_state();
    (create_test_server(state), store)
}

/// Utente registrato durante il test
pub struct TestUser {
    pub id: i64,
    pub username: String,
    pub token: String,
}

impl TestUser {
    /// Valore dell'header Authorization
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

pub fn authorization() -> HeaderName {
    HeaderName::from_static("authorization")
}

/// Registra un utente e verifica la risposta 201 Created
pub async fn register(server: &TestServer, username: &str) -> TestUser {
    let response = server
        .post("/api/v1/auth/register")
        .json(&json!({
            "username": username,
            "password": PASSWORD
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();

    TestUser {
        id: body["id"].as_i64().expect("register response should carry the id"),
        username: body["username"]
            .as_str()
            .expect("register response should carry the username")
            .to_string(),
        token: body["token"]
            .as_str()
            .expect("register response should carry the token")
            .to_string(),
    }
}

/// Body delle richieste send/accept/reject
pub fn invite_body(sender_id: i64, receiver_id: i64) -> Value {
    json!({
        "userSenderId": sender_id,
        "userReceiverId": receiver_id
    })
}
