//! # Staff Roles and Authenticated Identity
//!
//! [`Identity`] is the record returned by `GET me/` after authentication:
//! the account id, username, optional email, and the list of role names
//! the server granted.
//!
//! ## Role Strings
//!
//! Roles arrive as plain strings using the server's French names
//! (`Administrateur`, `Medecin`, `Secretaire`, `Utilisateur`). Unknown
//! role strings must never fail identity deserialization — the server may
//! add roles the client does not know about — so [`Identity`] stores the
//! raw strings and [`Role`] membership is answered by comparing wire
//! names.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::UserId;

/// Staff role granted by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Full administrative access, including record management.
    Administrator,
    /// Medical staff; appears in the physician roster.
    Physician,
    /// Front-desk staff; may manage patient and appointment records.
    Secretary,
    /// Authenticated account with read-only access.
    User,
}

impl Role {
    /// The role name as the server spells it.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Administrator => "Administrateur",
            Self::Physician => "Medecin",
            Self::Secretary => "Secretaire",
            Self::User => "Utilisateur",
        }
    }

    /// Parse a server role string. Returns `None` for role names this
    /// client does not recognize; the caller keeps the raw string.
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "Administrateur" => Some(Self::Administrator),
            "Medecin" => Some(Self::Physician),
            "Secretaire" => Some(Self::Secretary),
            "Utilisateur" => Some(Self::User),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Administrator => write!(f, "Administrator"),
            Self::Physician => write!(f, "Physician"),
            Self::Secretary => write!(f, "Secretary"),
            Self::User => write!(f, "User"),
        }
    }
}

/// The authenticated account as returned by `GET me/`.
///
/// Immutable once fetched for the session; refreshed only by
/// re-authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Account primary key.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Contact email, when the account has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Role names exactly as the server sent them.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Identity {
    /// Whether the server granted `role` to this account.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.iter().any(|r| r == role.wire_name())
    }
}

/// A roster entry from `GET medecins/` — accounts holding the Physician
/// role, in the reduced shape that endpoint serves (no role list).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Physician {
    /// Account primary key.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Family name, when the account records one.
    #[serde(rename = "nom", default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Given name, when the account records one.
    #[serde(rename = "prenom", default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Contact email, when the account records one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Physician {
    /// `"{last_name} {first_name}"` when names are recorded, otherwise
    /// the login name.
    pub fn display_name(&self) -> String {
        match (self.last_name.as_deref(), self.first_name.as_deref()) {
            (Some(last), Some(first)) if !last.is_empty() || !first.is_empty() => {
                format!("{last} {first}").trim().to_string()
            }
            _ => self.username.clone(),
        }
    }
}

/// Single authorization predicate for record management (create, update,
/// delete of patients and appointments). Consumed by the route guard and
/// by per-view conditional rendering alike, so the rule lives in exactly
/// one place.
///
/// A UX convenience only: the server enforces authorization on every
/// mutating endpoint regardless of what the client offers.
pub fn can_manage_records(identity: &Identity) -> bool {
    identity.has_role(Role::Administrator) || identity.has_role(Role::Secretary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_with(roles: &[&str]) -> Identity {
        Identity {
            id: UserId::new(1),
            username: "astou".to_string(),
            email: None,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn role_wire_round_trip() {
        for role in [
            Role::Administrator,
            Role::Physician,
            Role::Secretary,
            Role::User,
        ] {
            assert_eq!(Role::from_wire(role.wire_name()), Some(role));
        }
    }

    #[test]
    fn unknown_role_string_parses_to_none() {
        assert_eq!(Role::from_wire("Comptable"), None);
    }

    #[test]
    fn identity_deserializes_with_unknown_roles() {
        let json = serde_json::json!({
            "id": 3,
            "username": "fatou",
            "email": "fatou@clinic.example",
            "roles": ["Secretaire", "Comptable"]
        });
        let identity: Identity = serde_json::from_value(json).expect("deserialize");
        assert!(identity.has_role(Role::Secretary));
        assert!(!identity.has_role(Role::Administrator));
        assert_eq!(identity.roles.len(), 2);
    }

    #[test]
    fn identity_without_roles_field() {
        let json = serde_json::json!({ "id": 9, "username": "mamadou" });
        let identity: Identity = serde_json::from_value(json).expect("deserialize");
        assert!(identity.roles.is_empty());
        assert!(!identity.has_role(Role::User));
    }

    #[test]
    fn physician_display_name_falls_back_to_username() {
        let with_names: Physician = serde_json::from_value(serde_json::json!({
            "id": 4, "username": "kdia", "nom": "Dia", "prenom": "Khady",
            "email": "kdia@clinic.example"
        }))
        .expect("deserialize");
        assert_eq!(with_names.display_name(), "Dia Khady");

        let bare: Physician =
            serde_json::from_value(serde_json::json!({ "id": 5, "username": "mnd" }))
                .expect("deserialize");
        assert_eq!(bare.display_name(), "mnd");
    }

    #[test]
    fn manage_predicate_accepts_admin_and_secretary_only() {
        assert!(can_manage_records(&identity_with(&["Administrateur"])));
        assert!(can_manage_records(&identity_with(&["Secretaire"])));
        assert!(can_manage_records(&identity_with(&[
            "Utilisateur",
            "Secretaire"
        ])));
        assert!(!can_manage_records(&identity_with(&["Medecin"])));
        assert!(!can_manage_records(&identity_with(&["Utilisateur"])));
        assert!(!can_manage_records(&identity_with(&[])));
    }
}
