//! Clinic API client error types.
//!
//! One variant per failure class in the error taxonomy: transport
//! failures, the authentication outcomes, the interpreted HTTP statuses
//! (403, 404, 5xx), remaining 4xx responses with the server's own
//! detail, and decode failures. [`ApiError::user_message`] translates
//! each to the banner string a page displays; gateways never swallow an
//! error and the adapter never interprets statuses beyond this mapping.

use crate::config::ConfigError;

/// Errors from clinic API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server could not be reached (connection refused, DNS, TLS).
    #[error("cannot reach server for {endpoint}: {source}")]
    Network {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The request exceeded the configured timeout.
    #[error("request to {endpoint} timed out")]
    Timeout { endpoint: String },

    /// Authentication is unrecoverable: the refresh attempt failed, or a
    /// second 401 arrived after a fresh token. Credentials have been
    /// cleared; the caller must return to the login boundary.
    #[error("session expired")]
    SessionExpired,

    /// The server refused the operation for this account (HTTP 403).
    #[error("{endpoint} returned 403: insufficient permissions")]
    Forbidden { endpoint: String },

    /// The resource does not exist (HTTP 404).
    #[error("{endpoint} returned 404: not found")]
    NotFound { endpoint: String },

    /// The server failed (HTTP 5xx).
    #[error("{endpoint} returned server error {status}")]
    Server { endpoint: String, status: u16 },

    /// Any other non-success response, carrying the server-supplied
    /// detail when one was present in the body.
    #[error("{endpoint} returned {status}: {detail}")]
    Api {
        endpoint: String,
        status: u16,
        detail: String,
    },

    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// The user-displayable translation of this failure.
    ///
    /// Pages show this string in an error banner and keep their previous
    /// state; nothing here is meant for logs (the `Display` impl serves
    /// that purpose).
    pub fn user_message(&self) -> String {
        match self {
            Self::Network { .. } => "Cannot reach the server.".to_string(),
            Self::Timeout { .. } => "The server took too long to respond.".to_string(),
            Self::SessionExpired => "Session expired. Please sign in again.".to_string(),
            Self::Forbidden { .. } => "Insufficient permissions.".to_string(),
            Self::NotFound { .. } => "Resource not found.".to_string(),
            Self::Server { .. } => "Server error.".to_string(),
            Self::Api { detail, .. } if !detail.is_empty() => detail.clone(),
            Self::Api { .. } => "Unexpected error.".to_string(),
            Self::Deserialization { .. } => "Unexpected response from the server.".to_string(),
            Self::Config(_) => "Invalid client configuration.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_cover_the_taxonomy() {
        assert_eq!(
            ApiError::Forbidden {
                endpoint: "patients/".to_string()
            }
            .user_message(),
            "Insufficient permissions."
        );
        assert_eq!(
            ApiError::NotFound {
                endpoint: "patients/9/".to_string()
            }
            .user_message(),
            "Resource not found."
        );
        assert_eq!(
            ApiError::Server {
                endpoint: "rendezvous/".to_string(),
                status: 502
            }
            .user_message(),
            "Server error."
        );
        assert_eq!(
            ApiError::SessionExpired.user_message(),
            "Session expired. Please sign in again."
        );
    }

    #[test]
    fn server_detail_is_surfaced_verbatim() {
        let err = ApiError::Api {
            endpoint: "patients/".to_string(),
            status: 400,
            detail: "matricule already exists".to_string(),
        };
        assert_eq!(err.user_message(), "matricule already exists");

        let blank = ApiError::Api {
            endpoint: "patients/".to_string(),
            status: 400,
            detail: String::new(),
        };
        assert_eq!(blank.user_message(), "Unexpected error.");
    }
}
