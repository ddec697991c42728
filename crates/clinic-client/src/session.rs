//! # Session Store
//!
//! Owns the authenticated identity and the session lifecycle. Explicitly
//! constructed and passed to consumers; every page reads session state
//! through the capability queries here, and nothing else writes
//! credential state.
//!
//! ## Lifecycle
//!
//! The store starts in [`SessionStatus::Loading`]. [`SessionStore::initialize`]
//! resolves a persisted token (if any) into an identity and settles the
//! status exactly once — to `Authenticated` on success, `Unauthenticated`
//! otherwise. [`SessionStore::login`] and [`SessionStore::logout`] move
//! between the settled states; a silent refresh inside the HTTP adapter
//! replaces the access token without touching the identity.

use std::sync::Arc;

use parking_lot::RwLock;

use clinic_core::{can_manage_records, Identity, Role};

use crate::credentials::CredentialStore;
use crate::error::ApiError;
use crate::gateways::AuthGateway;
use crate::http::ApiClient;

/// Authentication status of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No identity; credentials absent or rejected.
    Unauthenticated,
    /// Startup resolution of a persisted token is still in flight.
    Loading,
    /// An identity is present and tokens are held.
    Authenticated,
}

#[derive(Debug)]
struct SessionState {
    status: SessionStatus,
    identity: Option<Identity>,
}

/// The session store. One instance per application, shared behind an
/// [`Arc`]; the store is the sole writer of identity state and (through
/// login/logout) of persisted credentials.
pub struct SessionStore {
    auth: AuthGateway,
    credentials: Arc<dyn CredentialStore>,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Build a store over the shared HTTP adapter. The store starts in
    /// [`SessionStatus::Loading`] until [`initialize`](Self::initialize)
    /// settles it.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            credentials: client.credentials(),
            auth: AuthGateway::new(client),
            state: RwLock::new(SessionState {
                status: SessionStatus::Loading,
                identity: None,
            }),
        }
    }

    /// Resolve a persisted access token into an identity.
    ///
    /// On any failure the persisted tokens are cleared and the session
    /// settles `Unauthenticated`. The `Loading` status is cleared exactly
    /// once, on every path out of this method.
    pub async fn initialize(&self) {
        let resolved = if self.credentials.access().is_some() {
            match self.auth.current_user().await {
                Ok(identity) => Some(identity),
                Err(e) => {
                    tracing::info!("persisted token rejected, starting unauthenticated: {e}");
                    self.credentials.clear();
                    None
                }
            }
        } else {
            None
        };

        let mut state = self.state.write();
        state.identity = resolved;
        state.status = if state.identity.is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Unauthenticated
        };
    }

    /// Exchange credentials for a token pair and resolve the identity.
    ///
    /// On failure the session is left `Unauthenticated` and the returned
    /// string is ready for display — bad credentials surface the
    /// server's own message, transport failures the standard
    /// translation. This method never propagates an error value.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), String> {
        let tokens = match self.auth.login(username, password).await {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::debug!(username, "login rejected: {e}");
                self.settle_unauthenticated();
                return Err(login_failure_message(&e));
            }
        };

        self.credentials.store_pair(tokens);

        match self.auth.current_user().await {
            Ok(identity) => {
                tracing::info!(username = %identity.username, "login succeeded");
                let mut state = self.state.write();
                state.identity = Some(identity);
                state.status = SessionStatus::Authenticated;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("identity resolution after login failed: {e}");
                self.credentials.clear();
                self.settle_unauthenticated();
                Err(e.user_message())
            }
        }
    }

    /// Clear persisted tokens and the in-memory identity. Synchronous
    /// and idempotent.
    pub fn logout(&self) {
        self.credentials.clear();
        self.settle_unauthenticated();
    }

    /// Current authentication status.
    pub fn status(&self) -> SessionStatus {
        self.state.read().status
    }

    /// The authenticated identity, when present.
    pub fn identity(&self) -> Option<Identity> {
        self.state.read().identity.clone()
    }

    /// Whether the session holds an identity.
    pub fn is_authenticated(&self) -> bool {
        self.status() == SessionStatus::Authenticated
    }

    /// Pure role query; `false` when no identity is present.
    pub fn has_role(&self, role: Role) -> bool {
        self.state
            .read()
            .identity
            .as_ref()
            .is_some_and(|identity| identity.has_role(role))
    }

    /// Whether the current identity may manage patient and appointment
    /// records (the shared authorization predicate).
    pub fn can_manage_records(&self) -> bool {
        self.state
            .read()
            .identity
            .as_ref()
            .is_some_and(can_manage_records)
    }

    fn settle_unauthenticated(&self) {
        let mut state = self.state.write();
        state.identity = None;
        state.status = SessionStatus::Unauthenticated;
    }
}

/// Translate a login failure. The server's own rejection detail wins;
/// transport-level failures fall back to the standard translations;
/// anything else reads as bad credentials.
fn login_failure_message(error: &ApiError) -> String {
    match error {
        ApiError::Api { detail, .. } if !detail.is_empty() => detail.clone(),
        ApiError::Network { .. } | ApiError::Timeout { .. } | ApiError::Server { .. } => {
            error.user_message()
        }
        _ => "Incorrect username or password.".to_string(),
    }
}
