//! Auth endpoint operations: credential exchange and identity
//! resolution.

use std::sync::Arc;

use serde::Serialize;

use clinic_core::Identity;

use crate::credentials::TokenPair;
use crate::error::ApiError;
use crate::http::ApiClient;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Typed operations against the Auth endpoint.
#[derive(Debug, Clone)]
pub struct AuthGateway {
    client: Arc<ApiClient>,
}

impl AuthGateway {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// `POST login/` — exchange credentials for a token pair.
    ///
    /// Issued outside the bearer/refresh boundary: a 401 here means the
    /// credentials were wrong, and the server's `detail` is preserved in
    /// the error.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, ApiError> {
        self.client
            .post_unauthenticated("login/", &LoginRequest { username, password })
            .await
    }

    /// `GET me/` — resolve the identity behind the stored access token.
    pub async fn current_user(&self) -> Result<Identity, ApiError> {
        self.client.get("me/").await
    }
}
