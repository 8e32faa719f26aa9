//! User DTOs - Data Transfer Objects per utenti

use crate::entities::User;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static! {
    static ref USERNAME_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_]+$").unwrap();
}

// struct per gestire io col client
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserDTO {
    pub id: Option<i64>,
    pub username: Option<String>,
}

impl From<User> for UserDTO {
    fn from(value: User) -> Self {
        Self {
            id: Some(value.user_id),
            username: Some(value.username),
            // la password non viene mai esposta al client
        }
    }
}

/// DTO per creare un nuovo utente (senza user_id)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateUserDTO {
    #[validate(
        length(min = 3, max = 32, message = "Username must be between 3 and 32 characters"),
        regex(path = *USERNAME_REGEX, message = "Username may contain only letters, digits and underscores")
    )]
    pub username: String,

    #[validate(length(min = 8, max = 128, message = "Password must be between 8 and 128 characters"))]
    pub password: String,
}

/// DTO per il login (solo username e password)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginDTO {
    pub username: String,
    pub password: String,
}

/// Risposta di register e login: utente e bearer token da usare nell'header Authorization
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthTokenDTO {
    pub id: i64,
    pub username: String,
    pub token: String,
}
