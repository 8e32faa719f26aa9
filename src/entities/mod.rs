//! Entities module - Entità del dominio applicativo
//!
//! Questo modulo contiene tutte le entità (models) che rappresentano i dati persistiti.
//! Ogni entity corrisponde a una tabella nel database (o a una mappa nello store in memoria).

pub mod enums;
pub mod friend_invite;
pub mod friendship;
pub mod user;

// Re-exports per facilitare l'import
pub use enums::InviteStatus;
pub use friend_invite::FriendInvite;
pub use friendship::{Friendship, unordered_pair};
pub use user::User;
