//! # clinic-client — Transport and Session Layer
//!
//! The single point of outbound communication with the clinic API, plus
//! the session lifecycle built on top of it.
//!
//! ## Architecture
//!
//! ```text
//! SessionStore ──► AuthGateway ──┐
//! PatientsGateway ───────────────┼──► ApiClient ──► remote API
//! AppointmentsGateway ───────────┤       │
//! UsersGateway ──────────────────┘       ▼
//!                                  CredentialStore
//! ```
//!
//! [`ApiClient`] owns base address, timeout, bearer injection, and the
//! 401 refresh-and-retry rule. Gateways are thin typed request builders,
//! one HTTP verb/path pair per operation, with no business logic.
//! [`SessionStore`] is explicitly constructed and passed to consumers —
//! there is no process-wide singleton.
//!
//! ## Credential Handling
//!
//! Two opaque tokens keyed `access`/`refresh`, held by a
//! [`CredentialStore`] implementation: in-memory for tests and
//! short-lived tools, file-backed for the CLI. Cleared wholesale on
//! logout or unrecoverable authentication failure.

pub mod config;
pub mod credentials;
pub mod error;
pub mod gateways;
pub mod http;
pub mod session;

pub use config::{ApiConfig, ConfigError};
pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore, TokenPair};
pub use error::ApiError;
pub use gateways::{AppointmentsGateway, AuthGateway, PatientsGateway, UsersGateway};
pub use http::ApiClient;
pub use session::{SessionStatus, SessionStore};
