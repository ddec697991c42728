//! Patients endpoint operations.

use std::sync::Arc;

use clinic_core::{Patient, PatientId, PatientSubmission};

use crate::error::ApiError;
use crate::http::ApiClient;

/// Typed operations against the Patients endpoint.
///
/// The gateway performs no role check: the server enforces authorization
/// on every mutating call, and the client-side gate lives in the
/// view-model layer as a UX convenience.
#[derive(Debug, Clone)]
pub struct PatientsGateway {
    client: Arc<ApiClient>,
}

impl PatientsGateway {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// `GET patients/` — the full patient list.
    pub async fn list(&self) -> Result<Vec<Patient>, ApiError> {
        self.client.get("patients/").await
    }

    /// `GET patients/{id}/` — a single record.
    pub async fn get(&self, id: PatientId) -> Result<Patient, ApiError> {
        self.client.get(&format!("patients/{id}/")).await
    }

    /// `POST patients/` — create a record; the response is the record as
    /// the server stored it.
    pub async fn create(&self, submission: &PatientSubmission) -> Result<Patient, ApiError> {
        self.client.post("patients/", submission).await
    }

    /// `PUT patients/{id}/` — full update of a record.
    pub async fn update(
        &self,
        id: PatientId,
        submission: &PatientSubmission,
    ) -> Result<Patient, ApiError> {
        self.client.put(&format!("patients/{id}/"), submission).await
    }

    /// `DELETE patients/{id}/` — remove a record (204 on success).
    pub async fn delete(&self, id: PatientId) -> Result<(), ApiError> {
        self.client.delete(&format!("patients/{id}/")).await
    }
}
