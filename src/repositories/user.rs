//! UserRepository - Repository MySQL per la gestione degli utenti

use super::{Create, Read, StoreError, UserStore};
use crate::dtos::CreateUserDTO;
use crate::entities::User;
use async_trait::async_trait;
use sqlx::MySqlPool;

// USER REPO
pub struct UserRepository {
    connection_pool: MySqlPool,
}

impl UserRepository {
    pub fn new(connection_pool: MySqlPool) -> UserRepository {
        Self { connection_pool }
    }
}

#[async_trait]
impl Create<User, CreateUserDTO> for UserRepository {
    /// `data.password` deve essere già l'hash bcrypt
    async fn create(&self, data: &CreateUserDTO) -> Result<User, StoreError> {
        let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
            .bind(&data.username)
            .bind(&data.password)
            .execute(&self.connection_pool)
            .await
            .map_err(|e| StoreError::on_unique_violation(e, StoreError::UsernameTaken))?;

        Ok(User {
            user_id: result.last_insert_id() as i64,
            username: data.username.clone(),
            password: data.password.clone(),
        })
    }
}

#[async_trait]
impl Read<User, i64> for UserRepository {
    async fn read(&self, id: &i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT user_id, username, password FROM users WHERE user_id = ?",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(user)
    }
}

#[async_trait]
impl UserStore for UserRepository {
    ///considero l'username univoco
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT user_id, username, password FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(user)
    }
}
