//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Ogni repository gestisce la persistenza di una specifica entità. Gli handler non
//! conoscono l'implementazione concreta: `AppState` contiene trait object
//! (`Arc<dyn UserStore>`, ...) che puntano ai repository MySQL oppure allo store in memoria.

// ************************* NOTA SULLE QUERY ************************* //

/*
   Le query usano la forma runtime di sqlx (`sqlx::query` / `sqlx::query_as::<_, T>`)
   e le entità derivano `sqlx::FromRow`: la compilazione non richiede un database attivo.
   Lo schema vive in `migrations/` e viene applicato all'avvio con `sqlx::migrate!`.

   Regola per scegliere il metodo finale:
   Number of Rows	Method to Call
   None	            .execute(...).await
   Zero or One	    .fetch_optional(...).await
   Exactly One	    .fetch_one(...).await
   Multiple	        .fetch_all(...).await
*/

// ************************* MODULI REPOSITORY ************************* //

pub mod error;
pub mod friend_invite;
pub mod friendship;
pub mod memory;
pub mod traits;
pub mod user;

pub use error::StoreError;
pub use traits::{Create, FriendInviteStore, FriendshipStore, Read, UserStore};

pub use friend_invite::FriendInviteRepository;
pub use friendship::FriendshipRepository;
pub use memory::MemoryStore;
pub use user::UserRepository;
