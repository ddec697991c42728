//! # Appointment Records and the Appointment Form
//!
//! [`Appointment`] mirrors the record the remote API serves under
//! `rendezvous/`. The wire status values are the server's French tokens
//! (`planifie` / `termine` / `annule`).
//!
//! ## Status Transitions
//!
//! The server is authoritative, but the client must not offer invalid
//! transitions: an appointment moves from [`AppointmentStatus::Scheduled`]
//! to `Completed` or `Cancelled` exactly once, and a finalized
//! appointment offers no further transition.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::{AppointmentId, PatientId, UserId};

/// Lifecycle state of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    /// Booked and upcoming.
    #[serde(rename = "planifie")]
    Scheduled,
    /// The visit took place.
    #[serde(rename = "termine")]
    Completed,
    /// Called off before the visit.
    #[serde(rename = "annule")]
    Cancelled,
}

impl AppointmentStatus {
    /// The status token as the server spells it.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Scheduled => "planifie",
            Self::Completed => "termine",
            Self::Cancelled => "annule",
        }
    }

    /// Whether the client may offer a transition from this status.
    /// Only scheduled appointments can still change.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Scheduled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scheduled => write!(f, "Scheduled"),
            Self::Completed => write!(f, "Completed"),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// An appointment record as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    /// Record primary key.
    pub id: AppointmentId,
    /// The patient this appointment is for.
    #[serde(rename = "patient")]
    pub patient_id: PatientId,
    /// The physician seeing the patient.
    #[serde(rename = "medecin")]
    pub physician_id: UserId,
    /// Calendar date of the visit.
    pub date: NaiveDate,
    /// Time-of-day of the visit.
    #[serde(rename = "heure")]
    pub time: NaiveTime,
    /// Lifecycle state.
    #[serde(rename = "statut")]
    pub status: AppointmentStatus,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST rendezvous/` and `PATCH rendezvous/{id}/`.
///
/// Only obtainable through [`AppointmentForm::validate`]. New
/// appointments default to [`AppointmentStatus::Scheduled`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentSubmission {
    /// The patient to book.
    #[serde(rename = "patient")]
    pub patient_id: PatientId,
    /// The physician to book.
    #[serde(rename = "medecin")]
    pub physician_id: UserId,
    /// Calendar date of the visit.
    pub date: NaiveDate,
    /// Time-of-day of the visit.
    #[serde(rename = "heure")]
    pub time: NaiveTime,
    /// Lifecycle state, `Scheduled` for new bookings.
    #[serde(rename = "statut")]
    pub status: AppointmentStatus,
}

/// Request body for the status-only update, `PATCH rendezvous/` with the
/// record id in the body rather than the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// The appointment to update.
    pub id: AppointmentId,
    /// The new lifecycle state.
    #[serde(rename = "statut")]
    pub status: AppointmentStatus,
}

/// The appointment booking form: selections and raw date/time input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentForm {
    pub patient_id: Option<PatientId>,
    pub physician_id: Option<UserId>,
    /// Calendar date as entered, `YYYY-MM-DD`.
    pub date: String,
    /// Time-of-day as entered, `HH:MM` or `HH:MM:SS`.
    pub time: String,
    /// Pre-existing status when editing; `Scheduled` for new bookings.
    pub status: Option<AppointmentStatus>,
}

impl AppointmentForm {
    /// Pre-fill the form from an existing record, for edit flows.
    pub fn from_appointment(appointment: &Appointment) -> Self {
        Self {
            patient_id: Some(appointment.patient_id),
            physician_id: Some(appointment.physician_id),
            date: appointment.date.to_string(),
            time: appointment.time.to_string(),
            status: Some(appointment.status),
        }
    }

    /// Validate every field and build the request body.
    pub fn validate(&self) -> Result<AppointmentSubmission, AppointmentFormErrors> {
        let mut errors = AppointmentFormErrors::default();

        if self.patient_id.is_none() {
            errors.patient = Some("Select a patient".to_string());
        }
        if self.physician_id.is_none() {
            errors.physician = Some("Select a physician".to_string());
        }

        let date = self.date.trim();
        let mut parsed_date = None;
        if date.is_empty() {
            errors.date = Some("Date is required".to_string());
        } else {
            match date.parse::<NaiveDate>() {
                Ok(d) => parsed_date = Some(d),
                Err(_) => errors.date = Some("Invalid date (expected YYYY-MM-DD)".to_string()),
            }
        }

        let time = self.time.trim();
        let mut parsed_time = None;
        if time.is_empty() {
            errors.time = Some("Time is required".to_string());
        } else {
            match parse_time(time) {
                Some(t) => parsed_time = Some(t),
                None => errors.time = Some("Invalid time (expected HH:MM)".to_string()),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        // Every missing or unparseable value carried a message, so all
        // four values are present past the check above.
        let (Some(patient_id), Some(physician_id), Some(date), Some(time)) =
            (self.patient_id, self.physician_id, parsed_date, parsed_time)
        else {
            return Err(errors);
        };

        Ok(AppointmentSubmission {
            patient_id,
            physician_id,
            date,
            time,
            status: self.status.unwrap_or(AppointmentStatus::Scheduled),
        })
    }
}

/// Accept both the `HH:MM` the time picker produces and the `HH:MM:SS`
/// the server echoes back.
fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

/// Per-field validation messages for [`AppointmentForm`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFormErrors {
    pub patient: Option<String>,
    pub physician: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

impl AppointmentFormErrors {
    /// True when no field carries a message.
    pub fn is_empty(&self) -> bool {
        self.patient.is_none()
            && self.physician.is_none()
            && self.date.is_none()
            && self.time.is_none()
    }

    /// (field, message) pairs for every violated field, in form order.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("patient", &self.patient),
            ("physician", &self.physician),
            ("date", &self.date),
            ("time", &self.time),
        ]
        .into_iter()
        .filter_map(|(name, msg)| msg.as_deref().map(|m| (name, m)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> AppointmentForm {
        AppointmentForm {
            patient_id: Some(PatientId::new(12)),
            physician_id: Some(UserId::new(4)),
            date: "2026-08-20".to_string(),
            time: "09:30".to_string(),
            status: None,
        }
    }

    #[test]
    fn valid_form_defaults_to_scheduled() {
        let submission = valid_form().validate().expect("valid");
        assert_eq!(submission.status, AppointmentStatus::Scheduled);
        assert_eq!(submission.time, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
    }

    #[test]
    fn seconds_form_of_time_is_accepted() {
        let mut form = valid_form();
        form.time = "14:15:00".to_string();
        let submission = form.validate().expect("valid");
        assert_eq!(submission.time, NaiveTime::from_hms_opt(14, 15, 0).unwrap());
    }

    #[test]
    fn missing_selections_reported_together() {
        let form = AppointmentForm::default();
        let errors = form.validate().expect_err("invalid");
        assert!(errors.patient.is_some());
        assert!(errors.physician.is_some());
        assert!(errors.date.is_some());
        assert!(errors.time.is_some());
        assert_eq!(errors.fields().len(), 4);
    }

    #[test]
    fn malformed_date_and_time_are_rejected() {
        let mut form = valid_form();
        form.date = "20/08/2026".to_string();
        form.time = "half past nine".to_string();
        let errors = form.validate().expect_err("invalid");
        assert!(errors.date.as_deref().unwrap().starts_with("Invalid date"));
        assert!(errors.time.as_deref().unwrap().starts_with("Invalid time"));
    }

    #[test]
    fn status_wire_tokens() {
        assert_eq!(
            serde_json::to_string(&AppointmentStatus::Scheduled).unwrap(),
            "\"planifie\""
        );
        assert_eq!(
            serde_json::to_string(&AppointmentStatus::Completed).unwrap(),
            "\"termine\""
        );
        assert_eq!(
            serde_json::to_string(&AppointmentStatus::Cancelled).unwrap(),
            "\"annule\""
        );
    }

    #[test]
    fn only_scheduled_is_open() {
        assert!(AppointmentStatus::Scheduled.is_open());
        assert!(!AppointmentStatus::Completed.is_open());
        assert!(!AppointmentStatus::Cancelled.is_open());
    }

    #[test]
    fn appointment_deserializes_from_wire_shape() {
        let json = serde_json::json!({
            "id": 7,
            "patient": 12,
            "medecin": 4,
            "date": "2026-08-20",
            "heure": "09:30:00",
            "statut": "planifie",
            "created_at": "2026-08-01T10:00:00Z"
        });
        let appointment: Appointment = serde_json::from_value(json).expect("deserialize");
        assert_eq!(appointment.patient_id, PatientId::new(12));
        assert_eq!(appointment.status, AppointmentStatus::Scheduled);
        assert_eq!(appointment.date, "2026-08-20".parse::<NaiveDate>().unwrap());
    }

    #[test]
    fn status_update_body_shape() {
        let body = StatusUpdate {
            id: AppointmentId::new(5),
            status: AppointmentStatus::Completed,
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json, serde_json::json!({ "id": 5, "statut": "termine" }));
    }

    #[test]
    fn edit_form_round_trips_record_fields() {
        let appointment: Appointment = serde_json::from_value(serde_json::json!({
            "id": 7,
            "patient": 12,
            "medecin": 4,
            "date": "2026-08-20",
            "heure": "09:30:00",
            "statut": "termine",
            "created_at": "2026-08-01T10:00:00Z"
        }))
        .expect("deserialize");
        let form = AppointmentForm::from_appointment(&appointment);
        let submission = form.validate().expect("valid");
        assert_eq!(submission.status, AppointmentStatus::Completed);
        assert_eq!(submission.patient_id, PatientId::new(12));
    }
}
