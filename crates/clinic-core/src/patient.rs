//! # Patient Records and the Patient Form
//!
//! [`Patient`] mirrors the record the remote API serves. [`PatientForm`]
//! is the typed edit form: a fixed field set validated field-by-field
//! into a [`PatientSubmission`], the exact request body for create and
//! full-update calls. Invalid forms never produce a submission, so no
//! request can be built from unvalidated input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{PatientId, UserId};
use crate::validate::{is_valid_email, is_valid_phone};

/// A patient record as returned by the API.
///
/// `matricule` is the clinic-assigned business identifier; it is unique
/// and immutable after creation (server-enforced).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Record primary key.
    pub id: PatientId,
    /// Clinic-assigned unique business identifier.
    pub matricule: String,
    /// Family name.
    #[serde(rename = "nom")]
    pub last_name: String,
    /// Given name.
    #[serde(rename = "prenom")]
    pub first_name: String,
    /// Contact phone, when recorded.
    #[serde(rename = "telephone", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Contact email, when recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Attending physician account, when assigned.
    #[serde(rename = "medecin", default, skip_serializing_if = "Option::is_none")]
    pub attending_physician_id: Option<UserId>,
    /// Server-side creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Patient {
    /// `"{last_name} {first_name}"`, the display order used throughout
    /// the clinic's paperwork.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }
}

/// Request body for `POST patients/` and `PUT patients/{id}/`.
///
/// Only obtainable through [`PatientForm::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientSubmission {
    /// Clinic-assigned unique business identifier.
    pub matricule: String,
    /// Family name.
    #[serde(rename = "nom")]
    pub last_name: String,
    /// Given name.
    #[serde(rename = "prenom")]
    pub first_name: String,
    /// Contact phone, omitted when not provided.
    #[serde(rename = "telephone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Contact email, omitted when not provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Attending physician, omitted when not assigned.
    #[serde(rename = "medecin", skip_serializing_if = "Option::is_none")]
    pub attending_physician_id: Option<UserId>,
}

/// The patient edit form: raw field values as entered, with optional
/// fields left as empty strings when blank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientForm {
    pub matricule: String,
    pub last_name: String,
    pub first_name: String,
    pub phone: String,
    pub email: String,
    pub attending_physician_id: Option<UserId>,
}

impl PatientForm {
    /// Pre-fill the form from an existing record, for edit flows.
    pub fn from_patient(patient: &Patient) -> Self {
        Self {
            matricule: patient.matricule.clone(),
            last_name: patient.last_name.clone(),
            first_name: patient.first_name.clone(),
            phone: patient.phone.clone().unwrap_or_default(),
            email: patient.email.clone().unwrap_or_default(),
            attending_physician_id: patient.attending_physician_id,
        }
    }

    /// Validate every field and build the request body.
    ///
    /// Checks are accumulated so the caller gets a message for each
    /// violated field in one pass, not just the first.
    pub fn validate(&self) -> Result<PatientSubmission, PatientFormErrors> {
        let mut errors = PatientFormErrors::default();

        let matricule = self.matricule.trim();
        if matricule.is_empty() {
            errors.matricule = Some("Matricule is required".to_string());
        }
        let last_name = self.last_name.trim();
        if last_name.is_empty() {
            errors.last_name = Some("Last name is required".to_string());
        }
        let first_name = self.first_name.trim();
        if first_name.is_empty() {
            errors.first_name = Some("First name is required".to_string());
        }
        let email = self.email.trim();
        if !email.is_empty() && !is_valid_email(email) {
            errors.email = Some("Invalid email address".to_string());
        }
        let phone = self.phone.trim();
        if !phone.is_empty() && !is_valid_phone(phone) {
            errors.phone = Some("Invalid phone number".to_string());
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(PatientSubmission {
            matricule: matricule.to_string(),
            last_name: last_name.to_string(),
            first_name: first_name.to_string(),
            phone: (!phone.is_empty()).then(|| phone.to_string()),
            email: (!email.is_empty()).then(|| email.to_string()),
            attending_physician_id: self.attending_physician_id,
        })
    }
}

/// Per-field validation messages for [`PatientForm`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientFormErrors {
    pub matricule: Option<String>,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl PatientFormErrors {
    /// True when no field carries a message.
    pub fn is_empty(&self) -> bool {
        self.matricule.is_none()
            && self.last_name.is_none()
            && self.first_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
    }

    /// (field, message) pairs for every violated field, in form order.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("matricule", &self.matricule),
            ("last_name", &self.last_name),
            ("first_name", &self.first_name),
            ("email", &self.email),
            ("phone", &self.phone),
        ]
        .into_iter()
        .filter_map(|(name, msg)| msg.as_deref().map(|m| (name, m)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> PatientForm {
        PatientForm {
            matricule: "PAT001".to_string(),
            last_name: "Diallo".to_string(),
            first_name: "Amadou".to_string(),
            phone: "771234567".to_string(),
            email: "amadou@clinic.sn".to_string(),
            attending_physician_id: Some(UserId::new(4)),
        }
    }

    #[test]
    fn valid_form_builds_submission() {
        let submission = valid_form().validate().expect("valid");
        assert_eq!(submission.matricule, "PAT001");
        assert_eq!(submission.phone.as_deref(), Some("771234567"));
        assert_eq!(submission.attending_physician_id, Some(UserId::new(4)));
    }

    #[test]
    fn blank_optionals_are_omitted() {
        let mut form = valid_form();
        form.phone = String::new();
        form.email = "  ".to_string();
        form.attending_physician_id = None;
        let submission = form.validate().expect("valid");
        assert_eq!(submission.phone, None);
        assert_eq!(submission.email, None);

        let json = serde_json::to_value(&submission).expect("serialize");
        let obj = json.as_object().expect("object");
        assert!(!obj.contains_key("telephone"));
        assert!(!obj.contains_key("email"));
        assert!(!obj.contains_key("medecin"));
    }

    #[test]
    fn required_fields_all_reported_in_one_pass() {
        let errors = PatientForm::default().validate().expect_err("invalid");
        assert!(errors.matricule.is_some());
        assert!(errors.last_name.is_some());
        assert!(errors.first_name.is_some());
        assert_eq!(errors.fields().len(), 3);
    }

    #[test]
    fn whitespace_only_required_field_is_rejected() {
        let mut form = valid_form();
        form.last_name = "   ".to_string();
        let errors = form.validate().expect_err("invalid");
        assert_eq!(errors.last_name.as_deref(), Some("Last name is required"));
        assert!(errors.matricule.is_none());
    }

    #[test]
    fn malformed_optionals_are_rejected() {
        let mut form = valid_form();
        form.email = "not-an-address".to_string();
        form.phone = "123".to_string();
        let errors = form.validate().expect_err("invalid");
        assert_eq!(errors.email.as_deref(), Some("Invalid email address"));
        assert_eq!(errors.phone.as_deref(), Some("Invalid phone number"));
    }

    #[test]
    fn submission_uses_wire_field_names() {
        let submission = valid_form().validate().expect("valid");
        let json = serde_json::to_value(&submission).expect("serialize");
        assert!(json.get("nom").is_some());
        assert!(json.get("prenom").is_some());
        assert!(json.get("telephone").is_some());
        assert!(json.get("medecin").is_some());
        assert!(json.get("last_name").is_none());
    }

    #[test]
    fn patient_deserializes_from_wire_shape() {
        let json = serde_json::json!({
            "id": 12,
            "matricule": "PAT012",
            "nom": "Sow",
            "prenom": "Fatou",
            "telephone": "770000000",
            "created_at": "2026-03-01T09:00:00Z"
        });
        let patient: Patient = serde_json::from_value(json).expect("deserialize");
        assert_eq!(patient.id, PatientId::new(12));
        assert_eq!(patient.full_name(), "Sow Fatou");
        assert_eq!(patient.email, None);
        assert_eq!(patient.attending_physician_id, None);
    }

    #[test]
    fn edit_form_round_trips_record_fields() {
        let patient: Patient = serde_json::from_value(serde_json::json!({
            "id": 3,
            "matricule": "PAT003",
            "nom": "Ba",
            "prenom": "Ousmane",
            "email": "ousmane@clinic.sn",
            "medecin": 4,
            "created_at": "2026-01-15T08:30:00Z"
        }))
        .expect("deserialize");
        let form = PatientForm::from_patient(&patient);
        assert_eq!(form.matricule, "PAT003");
        assert_eq!(form.phone, "");
        assert_eq!(form.attending_physician_id, Some(UserId::new(4)));
        let submission = form.validate().expect("valid");
        assert_eq!(submission.email.as_deref(), Some("ousmane@clinic.sn"));
    }
}
