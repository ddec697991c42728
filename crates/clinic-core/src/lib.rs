//! # clinic-core — Domain Types for the Clinic Administration Stack
//!
//! Foundational types shared by the transport layer (`clinic-client`) and
//! the page-level view-models (`clinic-app`):
//!
//! - Identifier newtypes ([`PatientId`], [`AppointmentId`], [`UserId`])
//! - Staff [`Role`]s and the authenticated [`Identity`]
//! - [`Patient`] and [`Appointment`] records as the remote API serves them
//! - Typed form records ([`PatientForm`], [`AppointmentForm`]) with
//!   field-by-field validation
//!
//! ## Wire Names
//!
//! The remote API speaks French (`nom`, `prenom`, `heure`, `statut`, ...).
//! Records carry `#[serde(rename)]` attributes so the Rust-side field
//! names stay English while the wire format matches the server exactly.
//!
//! ## Authorization
//!
//! [`can_manage_records`] is the single authorization predicate consumed
//! by both the route guard and per-view conditional rendering. The server
//! remains the security boundary; this predicate only decides what the
//! client offers.

pub mod appointment;
pub mod identity;
pub mod ids;
pub mod patient;
pub mod validate;

pub use appointment::{
    Appointment, AppointmentForm, AppointmentFormErrors, AppointmentStatus, AppointmentSubmission,
    StatusUpdate,
};
pub use identity::{can_manage_records, Identity, Physician, Role};
pub use ids::{AppointmentId, PatientId, UserId};
pub use patient::{Patient, PatientForm, PatientFormErrors, PatientSubmission};
