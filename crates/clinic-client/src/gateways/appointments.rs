//! Appointments endpoint operations (`rendezvous/` on the wire).

use std::sync::Arc;

use serde::Deserialize;

use clinic_core::{Appointment, AppointmentId, AppointmentSubmission, StatusUpdate};

use crate::error::ApiError;
use crate::http::ApiClient;

/// Acknowledgement body of the status-only update. The endpoint returns
/// a message, not the updated record; callers reload the list to
/// resynchronize.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdateAck {
    pub message: String,
}

/// Typed operations against the Appointments endpoint.
#[derive(Debug, Clone)]
pub struct AppointmentsGateway {
    client: Arc<ApiClient>,
}

impl AppointmentsGateway {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// `GET rendezvous/` — the full appointment list.
    pub async fn list(&self) -> Result<Vec<Appointment>, ApiError> {
        self.client.get("rendezvous/").await
    }

    /// `GET rendezvous/{id}/` — a single record.
    pub async fn get(&self, id: AppointmentId) -> Result<Appointment, ApiError> {
        self.client.get(&format!("rendezvous/{id}/")).await
    }

    /// `POST rendezvous/` — book an appointment.
    pub async fn create(
        &self,
        submission: &AppointmentSubmission,
    ) -> Result<Appointment, ApiError> {
        self.client.post("rendezvous/", submission).await
    }

    /// `PATCH rendezvous/{id}/` — partial update of a record.
    pub async fn update(
        &self,
        id: AppointmentId,
        submission: &AppointmentSubmission,
    ) -> Result<Appointment, ApiError> {
        self.client
            .patch(&format!("rendezvous/{id}/"), submission)
            .await
    }

    /// `DELETE rendezvous/{id}/` — remove a record (204 on success).
    pub async fn delete(&self, id: AppointmentId) -> Result<(), ApiError> {
        self.client.delete(&format!("rendezvous/{id}/")).await
    }

    /// `PATCH rendezvous/` — the status-only update, with the record id
    /// carried in the body rather than the path.
    pub async fn update_status(&self, update: &StatusUpdate) -> Result<StatusUpdateAck, ApiError> {
        self.client.patch("rendezvous/", update).await
    }
}
