//! FriendshipRepository - Repository MySQL per le amicizie
//!
//! Le righe vengono inserite solo da `FriendInviteRepository::resolve`, nella stessa
//! transazione che accetta l'invito.

use super::{FriendshipStore, StoreError};
use crate::entities::Friendship;
use async_trait::async_trait;
use sqlx::MySqlPool;

pub struct FriendshipRepository {
    connection_pool: MySqlPool,
}

impl FriendshipRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }
}

#[async_trait]
impl FriendshipStore for FriendshipRepository {
    async fn find_many_by_user_id(&self, user_id: i64) -> Result<Vec<Friendship>, StoreError> {
        let friendships = sqlx::query_as::<_, Friendship>(
            r#"
            SELECT user_low_id, user_high_id, since
            FROM friendships
            WHERE user_low_id = ? OR user_high_id = ?
            ORDER BY since
            "#,
        )
        .bind(user_id)
        .bind(user_id)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(friendships)
    }
}
