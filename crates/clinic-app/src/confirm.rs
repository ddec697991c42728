//! Interactive confirmation seam for destructive operations.
//!
//! Delete flows require a confirmation before any network call. The
//! decision is injected so the CLI can prompt on stdin while tests
//! record whether (and with what prompt) they were asked.

/// Asks the operator to confirm a destructive action.
pub trait ConfirmAction {
    /// Return `true` to proceed. Declining must leave the resource
    /// untouched — callers issue zero network calls on `false`.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Confirms everything without asking. For non-interactive use
/// (`--yes`) and scripted flows.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

impl ConfirmAction for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}
