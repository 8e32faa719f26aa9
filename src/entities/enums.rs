//! Enumerazioni - Tipi enumerati utilizzati nelle entità

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stato di un invito di amicizia.
///
/// `Pending` è l'unico stato da cui si può transitare: `Accepted` e `Rejected` sono terminali.
/// Sul database viene salvato come stringa maiuscola (`PENDING`, `ACCEPTED`, `REJECTED`).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum InviteStatus {
    Pending,
    Accepted,
    Rejected,
}

impl InviteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InviteStatus::Pending => "PENDING",
            InviteStatus::Accepted => "ACCEPTED",
            InviteStatus::Rejected => "REJECTED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, InviteStatus::Pending)
    }
}

impl fmt::Display for InviteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for InviteStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "PENDING" => Ok(InviteStatus::Pending),
            "ACCEPTED" => Ok(InviteStatus::Accepted),
            "REJECTED" => Ok(InviteStatus::Rejected),
            _ => Err(format!("unknown invite status: {value}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_is_not_terminal() {
        assert!(!InviteStatus::Pending.is_terminal());
        assert!(InviteStatus::Accepted.is_terminal());
        assert!(InviteStatus::Rejected.is_terminal());
    }

    #[test]
    fn status_text_matches_serde_and_parses_back() {
        for status in [
            InviteStatus::Pending,
            InviteStatus::Accepted,
            InviteStatus::Rejected,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            assert_eq!(InviteStatus::try_from(status.to_string()).unwrap(), status);
        }
        assert!(InviteStatus::try_from("MAYBE".to_string()).is_err());
    }
}
