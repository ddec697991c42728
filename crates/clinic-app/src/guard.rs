//! # Route Guard
//!
//! Pure navigation decision over session state and the roles a page
//! requires. Pages render the decision; they never duplicate the rules.

use clinic_client::{SessionStatus, SessionStore};
use clinic_core::{Identity, Role};

/// What the router should do with a guarded page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session resolution is still in flight; render a neutral waiting
    /// state.
    Waiting,
    /// Render the page.
    Allow,
    /// No identity; send the user to the login boundary.
    RedirectLogin,
    /// Authenticated but under-privileged; send the user to the default
    /// authenticated landing page.
    RedirectHome,
}

/// Decide access from raw session state.
///
/// With no required roles, any authenticated identity passes. With
/// required roles, the identity must hold at least one of them.
pub fn evaluate(
    status: SessionStatus,
    identity: Option<&Identity>,
    required_roles: &[Role],
) -> RouteDecision {
    match status {
        SessionStatus::Loading => RouteDecision::Waiting,
        SessionStatus::Unauthenticated => RouteDecision::RedirectLogin,
        SessionStatus::Authenticated => {
            let Some(identity) = identity else {
                // Authenticated without an identity should not happen;
                // treat it as unauthenticated rather than letting the
                // page render.
                return RouteDecision::RedirectLogin;
            };
            if required_roles.is_empty()
                || required_roles.iter().any(|role| identity.has_role(*role))
            {
                RouteDecision::Allow
            } else {
                RouteDecision::RedirectHome
            }
        }
    }
}

/// Convenience wrapper reading the live session store.
pub fn evaluate_session(session: &SessionStore, required_roles: &[Role]) -> RouteDecision {
    let identity = session.identity();
    evaluate(session.status(), identity.as_ref(), required_roles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_core::UserId;

    fn identity(roles: &[&str]) -> Identity {
        Identity {
            id: UserId::new(1),
            username: "astou".to_string(),
            email: None,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn loading_renders_waiting_state() {
        assert_eq!(
            evaluate(SessionStatus::Loading, None, &[Role::Administrator]),
            RouteDecision::Waiting
        );
    }

    #[test]
    fn unauthenticated_redirects_to_login() {
        assert_eq!(
            evaluate(SessionStatus::Unauthenticated, None, &[]),
            RouteDecision::RedirectLogin
        );
    }

    #[test]
    fn authenticated_without_role_requirements_is_allowed() {
        let id = identity(&["Utilisateur"]);
        assert_eq!(
            evaluate(SessionStatus::Authenticated, Some(&id), &[]),
            RouteDecision::Allow
        );
    }

    #[test]
    fn any_required_role_suffices() {
        let id = identity(&["Secretaire"]);
        assert_eq!(
            evaluate(
                SessionStatus::Authenticated,
                Some(&id),
                &[Role::Administrator, Role::Secretary]
            ),
            RouteDecision::Allow
        );
    }

    #[test]
    fn under_privileged_identity_redirects_home() {
        let id = identity(&["Medecin"]);
        assert_eq!(
            evaluate(
                SessionStatus::Authenticated,
                Some(&id),
                &[Role::Administrator, Role::Secretary]
            ),
            RouteDecision::RedirectHome
        );
    }
}
