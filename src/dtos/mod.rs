//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene tutti i DTOs usati per la comunicazione client-server.
//! I DTOs separano la rappresentazione esterna (API) dalla rappresentazione interna (entities).

pub mod friend_invite;
pub mod friendship;
pub mod user;

pub use friend_invite::{
    CreateFriendInviteDTO, EnrichedFriendInviteDTO, FriendInviteDTO, UserInviteDTO,
};
pub use friendship::FriendDTO;
pub use user::{AuthTokenDTO, CreateUserDTO, LoginDTO, UserDTO};
