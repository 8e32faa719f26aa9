//! Friendship DTOs

use crate::dtos::UserDTO;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Un amico dell'utente corrente, con la data da cui la relazione esiste
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FriendDTO {
    pub user: UserDTO,
    pub friends_since: DateTime<Utc>,
}
