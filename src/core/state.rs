//! Application State - Stato globale dell'applicazione
//!
//! Contiene gli store di persistenza e la configurazione condivisa
//! necessaria per gestire le richieste.

use crate::repositories::{
    FriendInviteRepository, FriendInviteStore, FriendshipRepository, FriendshipStore,
    MemoryStore, UserRepository, UserStore,
};
use sqlx::MySqlPool;
use std::sync::Arc;

/// Stato globale dell'applicazione condiviso tra tutte le route e middleware
pub struct AppState {
    /// Store per la gestione degli utenti
    pub user: Arc<dyn UserStore>,

    /// Store per la gestione degli inviti di amicizia
    pub invite: Arc<dyn FriendInviteStore>,

    /// Store per la lettura delle amicizie
    pub friendship: Arc<dyn FriendshipStore>,

    /// Secret key per JWT token
    pub jwt_secret: String,
}

impl AppState {
    /// Crea una nuova istanza di AppState con i repository MySQL
    /// che condividono il pool di connessioni fornito.
    ///
    /// # Arguments
    /// * `pool` - Pool di connessioni MySQL condiviso
    /// * `jwt_secret` - Chiave segreta per la firma dei token JWT
    pub fn new(pool: MySqlPool, jwt_secret: String) -> Self {
        Self {
            user: Arc::new(UserRepository::new(pool.clone())),
            invite: Arc::new(FriendInviteRepository::new(pool.clone())),
            friendship: Arc::new(FriendshipRepository::new(pool)),
            jwt_secret,
        }
    }

    /// Crea un AppState con tutti gli store puntati allo stesso `MemoryStore`
    pub fn in_memory(jwt_secret: String) -> Self {
        Self::with_memory_store(Arc::new(MemoryStore::new()), jwt_secret)
    }

    /// Come `in_memory`, ma lascia al chiamante un riferimento allo store
    pub fn with_memory_store(store: Arc<MemoryStore>, jwt_secret: String) -> Self {
        Self {
            user: store.clone(),
            invite: store.clone(),
            friendship: store,
            jwt_secret,
        }
    }
}
