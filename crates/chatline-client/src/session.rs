//! Session state machine.
//!
//! ```text
//! ┌───────────┐  login confirmed   ┌───────────────┐
//! │ Anonymous │───────────────────>│ Authenticated │
//! └───────────┘<───────────────────└───────────────┘
//!   │     ^      logout confirmed
//!   └─────┘
//!   newuser confirmed
//! ```
//!
//! The identity itself is held by the server; the client only tracks whether
//! a login has been confirmed. The session is owned by [`crate::Client`] and
//! only changes after a reply is interpreted, never during validation.

/// Authentication state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No confirmed login (initial).
    #[default]
    Anonymous,
    /// Login confirmed by the peer.
    Authenticated,
}

/// Client-local record of whether the operator is logged in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    state: SessionState,
}

impl Session {
    /// Create a session in [`SessionState::Anonymous`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session in the given state without a confirmed reply.
    ///
    /// Test support only; production sessions change state through
    /// [`crate::Client`].
    #[doc(hidden)]
    pub fn with_state(state: SessionState) -> Self {
        Self { state }
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether a login has been confirmed.
    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Authenticated
    }

    /// Apply a confirmed login. Returns `true` if the state changed.
    pub(crate) fn confirm_login(&mut self) -> bool {
        self.transition(SessionState::Authenticated)
    }

    /// Apply a confirmed logout. Returns `true` if the state changed.
    pub(crate) fn confirm_logout(&mut self) -> bool {
        self.transition(SessionState::Anonymous)
    }

    fn transition(&mut self, next: SessionState) -> bool {
        let changed = self.state != next;
        self.state = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_anonymous() {
        assert_eq!(Session::new().state(), SessionState::Anonymous);
        assert!(!Session::new().is_authenticated());
    }

    #[test]
    fn login_then_logout_round_trips() {
        let mut session = Session::new();

        assert!(session.confirm_login());
        assert!(session.is_authenticated());

        assert!(session.confirm_logout());
        assert_eq!(session.state(), SessionState::Anonymous);
    }

    #[test]
    fn repeated_login_transitions_once() {
        let mut session = Session::new();

        assert!(session.confirm_login());
        assert!(!session.confirm_login());
        assert!(session.is_authenticated());
    }
}
