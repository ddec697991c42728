//! # Identifier Newtypes
//!
//! Domain-primitive newtypes for the integer primary keys the remote API
//! assigns. Each identifier is a distinct type — you cannot pass a
//! [`PatientId`] where a [`UserId`] is expected.
//!
//! The server is the sole issuer of identifiers; these types never
//! fabricate values, they only carry what the API returned.

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($(#[$doc:meta])* $ty:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $ty(i64);

        impl $ty {
            /// Wrap a raw identifier received from the API.
            pub fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Access the underlying integer.
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $ty {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $ty {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<i64>().map(Self)
            }
        }
    };
}

id_newtype! {
    /// Primary key of a patient record.
    PatientId
}

id_newtype! {
    /// Primary key of an appointment record.
    AppointmentId
}

id_newtype! {
    /// Primary key of a staff account (including physicians).
    UserId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        // Compile-time property; the assertion below is incidental.
        let p = PatientId::new(42);
        let u = UserId::new(42);
        assert_eq!(p.as_i64(), u.as_i64());
    }

    #[test]
    fn serde_is_transparent() {
        let id = PatientId::new(7);
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "7");
        let back: PatientId = serde_json::from_str("7").expect("deserialize");
        assert_eq!(back, id);
    }

    #[test]
    fn display_and_parse_round_trip() {
        let id = AppointmentId::new(123);
        let s = id.to_string();
        let back: AppointmentId = s.parse().expect("parse");
        assert_eq!(back, id);
    }
}
