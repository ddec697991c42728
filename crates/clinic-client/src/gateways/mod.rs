//! # Resource Gateways
//!
//! Thin typed operations over the [`ApiClient`](crate::ApiClient), one
//! group per remote resource and one HTTP verb/path pair per operation.
//! No business logic lives here: payloads pass through unchanged and
//! failures propagate exactly as the adapter produced them.

mod appointments;
mod auth;
mod patients;
mod users;

pub use appointments::{AppointmentsGateway, StatusUpdateAck};
pub use auth::AuthGateway;
pub use patients::PatientsGateway;
pub use users::UsersGateway;
