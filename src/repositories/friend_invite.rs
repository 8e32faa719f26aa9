//! FriendInviteRepository - Repository MySQL per la gestione degli inviti di amicizia
//!
//! L'unicità dell'invito Pending per coppia non ordinata è garantita dal database:
//! la colonna generata `pending_pair` vale `"min:max"` solo finché lo stato è
//! PENDING (altrimenti NULL) ed è coperta da un indice UNIQUE.
//! L'inserimento fallisce anche quando la coppia compare già in `friendships`.

use super::{Create, FriendInviteStore, StoreError};
use crate::dtos::CreateFriendInviteDTO;
use crate::entities::{FriendInvite, InviteStatus, unordered_pair};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::MySqlPool;
use tracing::debug;

const INVITE_COLUMNS: &str =
    "invite_id, sender_id, receiver_id, status, created_at, resolved_at";

//FRIEND INVITE REPOSITORY
pub struct FriendInviteRepository {
    connection_pool: MySqlPool,
}

impl FriendInviteRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }

    async fn find_pending_where(
        &self,
        filter: &str,
        user_id: i64,
    ) -> Result<Vec<FriendInvite>, StoreError> {
        let sql = format!(
            "SELECT {INVITE_COLUMNS} FROM friend_invites WHERE {filter} = ? AND status = 'PENDING' ORDER BY created_at"
        );
        let invites = sqlx::query_as::<_, FriendInvite>(&sql)
            .bind(user_id)
            .fetch_all(&self.connection_pool)
            .await?;

        Ok(invites)
    }
}

#[async_trait]
impl Create<FriendInvite, CreateFriendInviteDTO> for FriendInviteRepository {
    async fn create(&self, data: &CreateFriendInviteDTO) -> Result<FriendInvite, StoreError> {
        // status e pending_pair: il primo è sempre PENDING, il secondo è calcolato da MySQL
        let now = Utc::now();
        let status = InviteStatus::Pending;

        // Unico statement: l'indice UNIQUE su pending_pair esclude il doppio Pending,
        // il NOT EXISTS esclude la coppia già amica (l'INSERT ... SELECT blocca in
        // lettura il range di friendships fino al commit)
        let (low, high) = unordered_pair(data.sender_id, data.receiver_id);
        let result = sqlx::query(
            r#"
            INSERT INTO friend_invites (sender_id, receiver_id, status, created_at)
            SELECT ?, ?, ?, ? FROM DUAL
            WHERE NOT EXISTS (
                SELECT 1 FROM friendships WHERE user_low_id = ? AND user_high_id = ?
            )
            "#,
        )
        .bind(data.sender_id)
        .bind(data.receiver_id)
        .bind(status.as_str())
        .bind(now)
        .bind(low)
        .bind(high)
        .execute(&self.connection_pool)
        .await
        .map_err(|e| StoreError::on_unique_violation(e, StoreError::DuplicatePending))?;

        if result.rows_affected() == 0 {
            debug!("Users {} and {} are already friends", low, high);
            return Err(StoreError::AlreadyFriends);
        }

        Ok(FriendInvite {
            invite_id: result.last_insert_id() as i64,
            sender_id: data.sender_id,
            receiver_id: data.receiver_id,
            status,
            created_at: now,
            resolved_at: None,
        })
    }
}

#[async_trait]
impl FriendInviteStore for FriendInviteRepository {
    async fn resolve(
        &self,
        sender_id: i64,
        receiver_id: i64,
        new_status: InviteStatus,
    ) -> Result<FriendInvite, StoreError> {
        let mut tx = self.connection_pool.begin().await?;

        // Blocca la riga Pending: due risposte concorrenti non possono entrambe vederla
        let sql = format!(
            "SELECT {INVITE_COLUMNS} FROM friend_invites \
             WHERE sender_id = ? AND receiver_id = ? AND status = 'PENDING' FOR UPDATE"
        );
        let mut invite = sqlx::query_as::<_, FriendInvite>(&sql)
            .bind(sender_id)
            .bind(receiver_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StoreError::NotFound)?;

        let now = Utc::now();
        sqlx::query(
            "UPDATE friend_invites SET status = ?, resolved_at = ? WHERE invite_id = ? AND status = 'PENDING'",
        )
        .bind(new_status.as_str())
        .bind(now)
        .bind(invite.invite_id)
        .execute(&mut *tx)
        .await?;

        if new_status == InviteStatus::Accepted {
            let (low, high) = unordered_pair(sender_id, receiver_id);
            debug!("Recording friendship between {} and {}", low, high);
            sqlx::query(
                r#"
                INSERT INTO friendships (user_low_id, user_high_id, since)
                VALUES (?, ?, ?)
                ON DUPLICATE KEY UPDATE since = since
                "#,
            )
            .bind(low)
            .bind(high)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        invite.status = new_status;
        invite.resolved_at = Some(now);
        Ok(invite)
    }

    async fn find_incoming_pending(&self, user_id: i64) -> Result<Vec<FriendInvite>, StoreError> {
        self.find_pending_where("receiver_id", user_id).await
    }

    async fn find_outgoing_pending(&self, user_id: i64) -> Result<Vec<FriendInvite>, StoreError> {
        self.find_pending_where("sender_id", user_id).await
    }
}
