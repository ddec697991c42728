//! # clinic-app — Page-Level View-Models
//!
//! The state and orchestration logic between a rendered page and the
//! resource gateways: list loading with concurrent dual fetch,
//! client-side filtering and grouping, create/update/delete flows that
//! validate before the network and reload after it, and the route guard.
//!
//! ## State Discipline
//!
//! Each view-model is the sole writer of its own list state. After every
//! successful mutation the full list is reloaded — the remote API is the
//! single source of truth, and the client never synthesizes a local
//! diff. On failure the previous list stays displayed and the failure is
//! translated into a page-level banner string.

pub mod appointments;
pub mod confirm;
pub mod guard;
pub mod messages;
pub mod patients;

pub use appointments::{AppointmentsView, AppointmentSubmitError, StatusFilter};
pub use confirm::{AutoConfirm, ConfirmAction};
pub use guard::{evaluate, evaluate_session, RouteDecision};
pub use patients::{PatientsView, PatientSubmitError};
