//! # Appointments View-Model
//!
//! Owns the appointment list page's state. On top of the same
//! load/create/update/delete shape as the patients page it adds the
//! status filter, grouping by date (most recent day first, earliest
//! time first within a day), the status-only transition, and local
//! patient label resolution.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;

use clinic_client::{ApiClient, AppointmentsGateway, PatientsGateway, SessionStore};
use clinic_core::{
    Appointment, AppointmentForm, AppointmentFormErrors, AppointmentId, AppointmentStatus,
    Patient, PatientId, StatusUpdate,
};

use crate::confirm::ConfirmAction;
use crate::messages;

/// Why a create/update call did not go through.
#[derive(Debug, thiserror::Error)]
pub enum AppointmentSubmitError {
    /// Local validation failed; per-field messages, zero network calls.
    #[error("appointment form validation failed")]
    Validation(AppointmentFormErrors),
    /// The server rejected the call; translated page-level message.
    #[error("{0}")]
    Rejected(String),
}

/// Status filter applied to the displayed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Show every appointment.
    #[default]
    All,
    /// Show only appointments in the given state.
    Only(AppointmentStatus),
}

impl StatusFilter {
    fn matches(&self, status: AppointmentStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }
}

/// State and orchestration for the appointment list page.
pub struct AppointmentsView {
    session: Arc<SessionStore>,
    appointments_gateway: AppointmentsGateway,
    patients_gateway: PatientsGateway,
    appointments: Vec<Appointment>,
    patients: Vec<Patient>,
    filter: StatusFilter,
    loading: bool,
    error: Option<String>,
    notice: Option<String>,
}

impl AppointmentsView {
    pub fn new(client: Arc<ApiClient>, session: Arc<SessionStore>) -> Self {
        Self {
            session,
            appointments_gateway: AppointmentsGateway::new(Arc::clone(&client)),
            patients_gateway: PatientsGateway::new(client),
            appointments: Vec::new(),
            patients: Vec::new(),
            filter: StatusFilter::All,
            loading: false,
            error: None,
            notice: None,
        }
    }

    /// Whether the current identity may book, edit, or delete
    /// appointments.
    pub fn can_edit(&self) -> bool {
        self.session.can_manage_records()
    }

    /// Fetch the appointment and patient lists concurrently; the patient
    /// list only serves local label resolution. Both must succeed for
    /// the page state to advance; on failure the previous lists stay
    /// displayed.
    pub async fn load(&mut self) {
        self.loading = true;
        let (appointments, patients) = tokio::join!(
            self.appointments_gateway.list(),
            self.patients_gateway.list()
        );
        match (appointments, patients) {
            (Ok(appointments), Ok(patients)) => {
                self.appointments = appointments;
                self.patients = patients;
                self.error = None;
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!("appointment page load failed: {e}");
                self.error = Some(e.user_message());
            }
        }
        self.loading = false;
    }

    /// Change the status filter. Purely local.
    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    /// The appointments passing the current status filter.
    pub fn filtered(&self) -> Vec<&Appointment> {
        filter_by_status(&self.appointments, self.filter)
    }

    /// The filtered appointments grouped by date — groups ordered by
    /// date descending, entries within a group by time ascending.
    pub fn grouped(&self) -> Vec<(NaiveDate, Vec<&Appointment>)> {
        group_by_date(self.filtered())
    }

    /// How many appointments (unfiltered) pass the given filter; feeds
    /// the filter buttons' counters.
    pub fn count(&self, filter: StatusFilter) -> usize {
        self.appointments
            .iter()
            .filter(|a| filter.matches(a.status))
            .count()
    }

    /// Resolve an appointment's patient reference against the loaded
    /// patient list: `"{matricule} - {last} {first}"`, falling back to
    /// a placeholder with the raw identifier. Never issues a network
    /// call.
    pub fn patient_label(&self, id: PatientId) -> String {
        patient_label(&self.patients, id)
    }

    /// Validate the form and book the appointment. New bookings default
    /// to `Scheduled`.
    pub async fn create(&mut self, form: &AppointmentForm) -> Result<(), AppointmentSubmitError> {
        let submission = form.validate().map_err(AppointmentSubmitError::Validation)?;
        let result = self.appointments_gateway.create(&submission).await;
        match result {
            Ok(created) => {
                tracing::info!(id = %created.id, date = %created.date, "appointment booked");
                self.notice = Some(messages::APPOINTMENT_CREATED.to_string());
                self.load().await;
                Ok(())
            }
            Err(e) => {
                let message = e.user_message();
                self.error = Some(message.clone());
                Err(AppointmentSubmitError::Rejected(message))
            }
        }
    }

    /// Validate the form and apply a partial update to the record.
    pub async fn update(
        &mut self,
        id: AppointmentId,
        form: &AppointmentForm,
    ) -> Result<(), AppointmentSubmitError> {
        let submission = form.validate().map_err(AppointmentSubmitError::Validation)?;
        let result = self.appointments_gateway.update(id, &submission).await;
        match result {
            Ok(_) => {
                tracing::info!(%id, "appointment updated");
                self.notice = Some(messages::APPOINTMENT_UPDATED.to_string());
                self.load().await;
                Ok(())
            }
            Err(e) => {
                let message = e.user_message();
                self.error = Some(message.clone());
                Err(AppointmentSubmitError::Rejected(message))
            }
        }
    }

    /// Transition a scheduled appointment to `Completed` or `Cancelled`
    /// via the status-only update, then reload.
    ///
    /// Finalized appointments refuse further transitions locally, with
    /// zero network calls — the page must not offer what the domain
    /// forbids.
    pub async fn update_status(
        &mut self,
        id: AppointmentId,
        new_status: AppointmentStatus,
    ) -> Result<(), String> {
        if new_status == AppointmentStatus::Scheduled {
            return Err("An appointment cannot return to scheduled.".to_string());
        }
        let Some(current) = self.appointments.iter().find(|a| a.id == id) else {
            return Err("Resource not found.".to_string());
        };
        if !current.status.is_open() {
            return Err("Only scheduled appointments can change status.".to_string());
        }

        let result = self
            .appointments_gateway
            .update_status(&StatusUpdate {
                id,
                status: new_status,
            })
            .await;
        match result {
            Ok(_) => {
                tracing::info!(%id, status = %new_status, "appointment status updated");
                self.notice = Some(messages::STATUS_UPDATED.to_string());
                self.load().await;
                Ok(())
            }
            Err(e) => {
                let message = e.user_message();
                self.error = Some(message.clone());
                Err(message)
            }
        }
    }

    /// Delete a record after interactive confirmation. Returns
    /// `Ok(false)` when the operator declines; no network call is issued
    /// in that case.
    pub async fn delete(
        &mut self,
        id: AppointmentId,
        confirm: &dyn ConfirmAction,
    ) -> Result<bool, String> {
        if !confirm.confirm("Delete this appointment?") {
            return Ok(false);
        }
        let result = self.appointments_gateway.delete(id).await;
        match result {
            Ok(()) => {
                tracing::info!(%id, "appointment deleted");
                self.notice = Some(messages::APPOINTMENT_DELETED.to_string());
                self.load().await;
                Ok(true)
            }
            Err(e) => {
                let message = e.user_message();
                self.error = Some(message.clone());
                Err(message)
            }
        }
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The current page-level error banner, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Consume the transient success notice.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }
}

/// Appointments passing the status filter, in list order.
pub fn filter_by_status(appointments: &[Appointment], filter: StatusFilter) -> Vec<&Appointment> {
    appointments
        .iter()
        .filter(|a| filter.matches(a.status))
        .collect()
}

/// Group by date, most recent day first; within a day, earliest time
/// first.
pub fn group_by_date(appointments: Vec<&Appointment>) -> Vec<(NaiveDate, Vec<&Appointment>)> {
    let mut buckets: BTreeMap<NaiveDate, Vec<&Appointment>> = BTreeMap::new();
    for appointment in appointments {
        buckets.entry(appointment.date).or_default().push(appointment);
    }
    buckets
        .into_iter()
        .rev()
        .map(|(date, mut group)| {
            group.sort_by_key(|a| a.time);
            (date, group)
        })
        .collect()
}

/// `"{matricule} - {last} {first}"` from the loaded list, or a
/// placeholder carrying the raw identifier.
pub fn patient_label(patients: &[Patient], id: PatientId) -> String {
    patients
        .iter()
        .find(|p| p.id == id)
        .map(|p| format!("{} - {}", p.matricule, p.full_name()))
        .unwrap_or_else(|| format!("Patient #{id}"))
}
