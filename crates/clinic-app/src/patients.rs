//! # Patients View-Model
//!
//! Owns the patient list page's state: the loaded lists, the loading
//! flag, and the banner messages. Orchestrates create/update/delete
//! against the patients gateway with local validation first and a full
//! list reload after every successful mutation.

use std::sync::Arc;

use clinic_client::{ApiClient, PatientsGateway, SessionStore, UsersGateway};
use clinic_core::{Patient, PatientForm, PatientFormErrors, PatientId, Physician};

use crate::confirm::ConfirmAction;
use crate::messages;

/// Why a create/update call did not go through.
#[derive(Debug, thiserror::Error)]
pub enum PatientSubmitError {
    /// Local validation failed; per-field messages, zero network calls.
    #[error("patient form validation failed")]
    Validation(PatientFormErrors),
    /// The server rejected the call; translated page-level message.
    #[error("{0}")]
    Rejected(String),
}

/// State and orchestration for the patient list page.
pub struct PatientsView {
    session: Arc<SessionStore>,
    patients_gateway: PatientsGateway,
    users_gateway: UsersGateway,
    patients: Vec<Patient>,
    physicians: Vec<Physician>,
    loading: bool,
    error: Option<String>,
    notice: Option<String>,
}

impl PatientsView {
    pub fn new(client: Arc<ApiClient>, session: Arc<SessionStore>) -> Self {
        Self {
            session,
            patients_gateway: PatientsGateway::new(Arc::clone(&client)),
            users_gateway: UsersGateway::new(client),
            patients: Vec::new(),
            physicians: Vec::new(),
            loading: false,
            error: None,
            notice: None,
        }
    }

    /// Whether the current identity may create, edit, or delete records.
    /// Gates what the page offers; the server enforces regardless.
    pub fn can_edit(&self) -> bool {
        self.session.can_manage_records()
    }

    /// Fetch the patient list and the physician roster concurrently.
    ///
    /// The two fetches have no ordering dependency and are joined before
    /// the page renders. On either failure the previous lists stay
    /// displayed and the first failure is surfaced as the banner.
    pub async fn load(&mut self) {
        self.loading = true;
        let (patients, physicians) = tokio::join!(
            self.patients_gateway.list(),
            self.users_gateway.physicians()
        );
        match patients {
            Ok(list) => {
                self.patients = list;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!("patient list load failed: {e}");
                self.error = Some(e.user_message());
            }
        }
        match physicians {
            Ok(roster) => self.physicians = roster,
            Err(e) => {
                tracing::warn!("physician roster load failed: {e}");
                if self.error.is_none() {
                    self.error = Some(e.user_message());
                }
            }
        }
        self.loading = false;
    }

    /// Pure client-side filter: case-insensitive substring match across
    /// matricule, names, phone, and email. Never touches the network.
    pub fn search(&self, term: &str) -> Vec<&Patient> {
        filter_patients(&self.patients, term)
    }

    /// Validate the form and create the record. On success the list is
    /// reloaded and a transient notice is set.
    pub async fn create(&mut self, form: &PatientForm) -> Result<(), PatientSubmitError> {
        let submission = form.validate().map_err(PatientSubmitError::Validation)?;
        let result = self.patients_gateway.create(&submission).await;
        match result {
            Ok(created) => {
                tracing::info!(id = %created.id, matricule = %created.matricule, "patient created");
                self.notice = Some(messages::PATIENT_CREATED.to_string());
                self.load().await;
                Ok(())
            }
            Err(e) => {
                let message = e.user_message();
                self.error = Some(message.clone());
                Err(PatientSubmitError::Rejected(message))
            }
        }
    }

    /// Validate the form and apply a full update to the record.
    pub async fn update(
        &mut self,
        id: PatientId,
        form: &PatientForm,
    ) -> Result<(), PatientSubmitError> {
        let submission = form.validate().map_err(PatientSubmitError::Validation)?;
        let result = self.patients_gateway.update(id, &submission).await;
        match result {
            Ok(_) => {
                tracing::info!(%id, "patient updated");
                self.notice = Some(messages::PATIENT_UPDATED.to_string());
                self.load().await;
                Ok(())
            }
            Err(e) => {
                let message = e.user_message();
                self.error = Some(message.clone());
                Err(PatientSubmitError::Rejected(message))
            }
        }
    }

    /// Delete a record after interactive confirmation.
    ///
    /// Returns `Ok(false)` when the operator declines — in that case no
    /// network call is issued.
    pub async fn delete(
        &mut self,
        id: PatientId,
        confirm: &dyn ConfirmAction,
    ) -> Result<bool, String> {
        let prompt = match self.patients.iter().find(|p| p.id == id) {
            Some(patient) => format!("Delete {}?", patient.full_name()),
            None => format!("Delete patient #{id}?"),
        };
        if !confirm.confirm(&prompt) {
            return Ok(false);
        }
        let result = self.patients_gateway.delete(id).await;
        match result {
            Ok(()) => {
                tracing::info!(%id, "patient deleted");
                self.notice = Some(messages::PATIENT_DELETED.to_string());
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

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn physicians(&self) -> &[Physician] {
        &self.physicians
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

/// Case-insensitive substring filter across matricule, last name, first
/// name, phone, and email.
pub fn filter_patients<'a>(patients: &'a [Patient], term: &str) -> Vec<&'a Patient> {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return patients.iter().collect();
    }
    patients
        .iter()
        .filter(|patient| {
            patient.matricule.to_lowercase().contains(&needle)
                || patient.last_name.to_lowercase().contains(&needle)
                || patient.first_name.to_lowercase().contains(&needle)
                || patient
                    .phone
                    .as_deref()
                    .is_some_and(|phone| phone.contains(&needle))
                || patient
                    .email
                    .as_deref()
                    .is_some_and(|email| email.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn patient(id: i64, matricule: &str, last: &str, first: &str) -> Patient {
        Patient {
            id: PatientId::new(id),
            matricule: matricule.to_string(),
            last_name: last.to_string(),
            first_name: first.to_string(),
            phone: None,
            email: None,
            attending_physician_id: None,
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn search_matches_name_case_insensitively() {
        let patients = vec![
            patient(1, "PAT001", "Diallo", "Amadou"),
            patient(2, "PAT002", "Sow", "Fatou"),
        ];
        let hits = filter_patients(&patients, "diallo");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].last_name, "Diallo");
    }

    #[test]
    fn search_spans_matricule_phone_and_email() {
        let mut with_contact = patient(3, "PAT003", "Ba", "Ousmane");
        with_contact.phone = Some("771234567".to_string());
        with_contact.email = Some("Ousmane@Clinic.sn".to_string());
        let patients = vec![with_contact, patient(4, "PAT004", "Ndiaye", "Awa")];

        assert_eq!(filter_patients(&patients, "pat003").len(), 1);
        assert_eq!(filter_patients(&patients, "7712").len(), 1);
        assert_eq!(filter_patients(&patients, "ousmane@clinic").len(), 1);
        assert_eq!(filter_patients(&patients, "PAT00").len(), 2);
    }

    #[test]
    fn empty_term_returns_the_full_list() {
        let patients = vec![
            patient(1, "PAT001", "Diallo", "Amadou"),
            patient(2, "PAT002", "Sow", "Fatou"),
        ];
        assert_eq!(filter_patients(&patients, "").len(), 2);
    }

    #[test]
    fn unmatched_term_returns_nothing() {
        let patients = vec![patient(1, "PAT001", "Diallo", "Amadou")];
        assert!(filter_patients(&patients, "kane").is_empty());
    }
}
