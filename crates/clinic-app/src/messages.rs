//! User-facing notice strings shown after successful operations.
//!
//! Error banners come from
//! [`ApiError::user_message`](clinic_client::ApiError::user_message);
//! only the success notices live here.

pub const PATIENT_CREATED: &str = "Patient added successfully";
pub const PATIENT_UPDATED: &str = "Patient updated successfully";
pub const PATIENT_DELETED: &str = "Patient deleted successfully";
pub const APPOINTMENT_CREATED: &str = "Appointment booked successfully";
pub const APPOINTMENT_UPDATED: &str = "Appointment updated successfully";
pub const APPOINTMENT_DELETED: &str = "Appointment deleted successfully";
pub const STATUS_UPDATED: &str = "Status updated successfully";
