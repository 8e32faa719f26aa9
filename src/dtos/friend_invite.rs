//! Friend invite DTOs - Data Transfer Objects per inviti di amicizia
//!
//! Il body di send/accept/reject usa i nomi camelCase `userSenderId` e `userReceiverId`.

use crate::dtos::UserDTO;
use crate::entities::{FriendInvite, InviteStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body delle richieste send/accept/reject: identifica la coppia mittente -> destinatario
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserInviteDTO {
    #[validate(range(min = 1, message = "userSenderId must be a positive id"))]
    pub user_sender_id: i64,
    #[validate(range(min = 1, message = "userReceiverId must be a positive id"))]
    pub user_receiver_id: i64,
}

/// Struct per gestire io col client
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FriendInviteDTO {
    pub invite_id: i64,
    pub user_sender_id: i64,
    pub user_receiver_id: i64,
    pub status: InviteStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl From<FriendInvite> for FriendInviteDTO {
    fn from(value: FriendInvite) -> Self {
        Self {
            invite_id: value.invite_id,
            user_sender_id: value.sender_id,
            user_receiver_id: value.receiver_id,
            status: value.status,
            created_at: value.created_at,
            resolved_at: value.resolved_at,
        }
    }
}

/// DTO per creare un nuovo invito (senza invite_id, status e created_at)
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct CreateFriendInviteDTO {
    pub sender_id: i64,
    pub receiver_id: i64,
}

impl From<UserInviteDTO> for CreateFriendInviteDTO {
    fn from(value: UserInviteDTO) -> Self {
        Self {
            sender_id: value.user_sender_id,
            receiver_id: value.user_receiver_id,
        }
    }
}

/// DTO arricchito con le informazioni dell'altro utente coinvolto nell'invito
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedFriendInviteDTO {
    pub invite_id: i64,
    pub status: InviteStatus,
    pub created_at: DateTime<Utc>,
    pub sender: Option<UserDTO>,
    pub receiver: Option<UserDTO>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn invite_body_uses_camel_case() {
        let dto: UserInviteDTO =
            serde_json::from_value(json!({ "userSenderId": 1, "userReceiverId": 2 })).unwrap();
        assert_eq!(dto.user_sender_id, 1);
        assert_eq!(dto.user_receiver_id, 2);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn non_positive_ids_fail_validation() {
        let dto = UserInviteDTO {
            user_sender_id: 0,
            user_receiver_id: 2,
        };
        assert!(dto.validate().is_err());
    }
}
