//! Staff roster operations.

use std::sync::Arc;

use clinic_core::Physician;

use crate::error::ApiError;
use crate::http::ApiClient;

/// Typed operations against the staff endpoint.
#[derive(Debug, Clone)]
pub struct UsersGateway {
    client: Arc<ApiClient>,
}

impl UsersGateway {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// `GET medecins/` — the roster of accounts holding the Physician
    /// role.
    pub async fn physicians(&self) -> Result<Vec<Physician>, ApiError> {
        self.client.get("medecins/").await
    }
}
