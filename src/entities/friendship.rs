//! Friendship entity - Relazione di amicizia simmetrica
//!
//! Una coppia di amici viene salvata una sola volta, con gli id ordinati
//! (`user_low_id < user_high_id`), così `{a, b}` e `{b, a}` sono la stessa riga.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Friendship {
    pub user_low_id: i64,
    pub user_high_id: i64,
    pub since: DateTime<Utc>,
}

impl Friendship {
    pub fn new(a: i64, b: i64, since: DateTime<Utc>) -> Self {
        let (user_low_id, user_high_id) = unordered_pair(a, b);
        Self {
            user_low_id,
            user_high_id,
            since,
        }
    }

    /// Returns the other member of the friendship, if `user_id` is part of it.
    pub fn other(&self, user_id: i64) -> Option<i64> {
        if self.user_low_id == user_id {
            Some(self.user_high_id)
        } else if self.user_high_id == user_id {
            Some(self.user_low_id)
        } else {
            None
        }
    }
}

/// Normalizza una coppia di utenti nella chiave non ordinata `(min, max)`.
pub fn unordered_pair(a: i64, b: i64) -> (i64, i64) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_is_order_independent() {
        assert_eq!(unordered_pair(1, 2), unordered_pair(2, 1));
        assert_eq!(unordered_pair(7, 3), (3, 7));
    }

    #[test]
    fn other_member_is_symmetric() {
        let friendship = Friendship::new(5, 2, Utc::now());
        assert_eq!(friendship.user_low_id, 2);
        assert_eq!(friendship.other(2), Some(5));
        assert_eq!(friendship.other(5), Some(2));
        assert_eq!(friendship.other(9), None);
    }
}
