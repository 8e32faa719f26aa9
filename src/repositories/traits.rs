//! Common repository traits
//!
//! This module defines generic interfaces for storage operations. Each store
//! (MySQL or in-memory) implements them, and handlers only see the trait objects.

use super::StoreError;
use crate::dtos::{CreateFriendInviteDTO, CreateUserDTO};
use crate::entities::{FriendInvite, Friendship, InviteStatus, User};
use async_trait::async_trait;

/// Trait for creating new entities
///
/// # Type Parameters
/// * `Entity` - Type of the returned entity (with ID assigned by the store)
/// * `CreateDTO` - DTO for creation (without ID, will be automatically generated)
#[async_trait]
pub trait Create<Entity, CreateDTO> {
    /// Creates a new entity
    ///
    /// # Returns
    /// * `Ok(Entity)` - Created entity with ID assigned by the store
    /// * `Err(StoreError)` - Error during insertion
    async fn create(&self, data: &CreateDTO) -> Result<Entity, StoreError>;
}

/// Trait for reading a single entity by primary key
///
/// # Type Parameters
/// * `Entity` - Type of the entity to read
/// * `Id` - Type of the primary key
#[async_trait]
pub trait Read<Entity, Id> {
    /// Reads an entity by its primary key
    ///
    /// # Returns
    /// * `Ok(Some(Entity))` - Entity found
    /// * `Ok(None)` - No entity with that ID
    /// * `Err(StoreError)` - Error during reading
    async fn read(&self, id: &Id) -> Result<Option<Entity>, StoreError>;
}

/// Storage of registered users.
///
/// `create` fails with [`StoreError::UsernameTaken`] when the username is in use.
#[async_trait]
pub trait UserStore: Create<User, CreateUserDTO> + Read<User, i64> + Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
}

/// Storage of friend invites.
///
/// `create` is an atomic check-and-insert: it fails with
/// [`StoreError::DuplicatePending`] when a `Pending` invite already exists for the
/// unordered pair `{sender_id, receiver_id}`, whatever its direction, and with
/// [`StoreError::AlreadyFriends`] when the two users are already friends.
#[async_trait]
pub trait FriendInviteStore: Create<FriendInvite, CreateFriendInviteDTO> + Send + Sync {
    /// Moves the pending invite `sender_id -> receiver_id` to `new_status`.
    ///
    /// The transition is a compare-and-swap on `Pending`; when `new_status` is
    /// `Accepted` the symmetric friendship is recorded in the same atomic step.
    /// Fails with [`StoreError::NotFound`] if no such pending invite exists.
    async fn resolve(
        &self,
        sender_id: i64,
        receiver_id: i64,
        new_status: InviteStatus,
    ) -> Result<FriendInvite, StoreError>;

    /// Pending invites received by `user_id`
    async fn find_incoming_pending(&self, user_id: i64) -> Result<Vec<FriendInvite>, StoreError>;

    /// Pending invites sent by `user_id`
    async fn find_outgoing_pending(&self, user_id: i64) -> Result<Vec<FriendInvite>, StoreError>;
}

/// Read side of the symmetric friendship relation
#[async_trait]
pub trait FriendshipStore: Send + Sync {
    async fn find_many_by_user_id(&self, user_id: i64) -> Result<Vec<Friendship>, StoreError>;
}
