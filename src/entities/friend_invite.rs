//! FriendInvite entity - Entità invito di amicizia

use super::enums::InviteStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct FriendInvite {
    pub invite_id: i64,
    pub sender_id: i64,   // utente che invita
    pub receiver_id: i64, // utente invitato
    #[sqlx(try_from = "String")]
    pub status: InviteStatus,
    pub created_at: DateTime<Utc>,
    // valorizzato solo quando l'invito esce dallo stato Pending
    pub resolved_at: Option<DateTime<Utc>>,
}

impl FriendInvite {
    /// True if the invite goes from `sender_id` to `receiver_id`, in this direction.
    pub fn is_directed(&self, sender_id: i64, receiver_id: i64) -> bool {
        self.sender_id == sender_id && self.receiver_id == receiver_id
    }
}
