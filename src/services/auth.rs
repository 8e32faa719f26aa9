//! Auth services - Gestione autenticazione e registrazione utenti

use crate::core::{AppError, AppState, encode_jwt};
use crate::dtos::{AuthTokenDTO, CreateUserDTO, LoginDTO};
use crate::entities::User;
use axum::{
    extract::{Json, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// Headers e body comuni a register e login: `Authorization: Bearer <token>` e il token nel JSON
fn token_response(
    status: StatusCode,
    user: User,
    token: String,
) -> Result<impl IntoResponse, AppError> {
    let mut headers = HeaderMap::new();
    let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| AppError::internal_server_error("Failed to build authorization header"))?;
    headers.insert(header::AUTHORIZATION, bearer);

    let body = AuthTokenDTO {
        id: user.user_id,
        username: user.username,
        token,
    };
    Ok((status, headers, Json(body)))
}

#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateUserDTO>, // JSON body
) -> Result<impl IntoResponse, AppError> {
    debug!("Registering new user");
    // 1. Validare il DTO con validator (formato e lunghezza di username/password)
    // 2. Controllare se esiste già un utente con lo stesso username (CONFLICT)
    // 3. Generare l'hash della password fornita
    // 4. Salvare il nuovo utente; lo store rifiuta comunque username duplicati in caso di race
    // 5. Emettere il token JWT e ritornare CREATED con token nell'header e nel body

    body.validate()?;

    if state.user.find_by_username(&body.username).await?.is_some() {
        warn!("Username already exists");
        return Err(AppError::conflict("Username already exists"));
    }

    let password_hash = User::hash_password(&body.password)
        .map_err(|_| AppError::internal_server_error("Failed to hash password"))?;

    let new_user = CreateUserDTO {
        username: body.username,
        password: password_hash,
    };

    let created_user = state.user.create(&new_user).await?;
    let token = encode_jwt(&created_user.username, created_user.user_id, &state.jwt_secret)?;

    info!("User registered with id {}", created_user.user_id);
    token_response(StatusCode::CREATED, created_user, token)
}

#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn login_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginDTO>, // JSON body
) -> Result<impl IntoResponse, AppError> {
    debug!("Login attempt");
    // 1. Cercare l'utente tramite username, UNAUTHORIZED se non esiste
    // 2. Verificare la password contro l'hash memorizzato, UNAUTHORIZED se non corrisponde
    // 3. Emettere il token JWT e ritornare OK

    let user = match state.user.find_by_username(&body.username).await? {
        Some(user) => user,
        None => {
            warn!("Login for unknown username");
            return Err(AppError::unauthorized("Invalid username or password"));
        }
    };

    if !user.verify_password(&body.password) {
        warn!("Wrong password");
        return Err(AppError::unauthorized("Invalid username or password"));
    }

    let token = encode_jwt(&user.username, user.user_id, &state.jwt_secret)?;

    info!("User {} logged in", user.user_id);
    token_response(StatusCode::OK, user, token)
}
