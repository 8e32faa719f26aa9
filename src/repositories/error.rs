//! Errori dello strato di persistenza

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Esiste già un invito Pending per la coppia non ordinata di utenti
    #[error("a pending friend invite already exists for this pair of users")]
    DuplicatePending,

    /// I due utenti sono già amici: nessun nuovo invito per la coppia
    #[error("users are already friends")]
    AlreadyFriends,

    #[error("username is already taken")]
    UsernameTaken,

    #[error("record not found")]
    NotFound,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Traduce una violazione di vincolo UNIQUE nell'errore di dominio indicato
    pub(crate) fn on_unique_violation(err: sqlx::Error, mapped: StoreError) -> StoreError {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => mapped,
            _ => StoreError::Database(err),
        }
    }
}
