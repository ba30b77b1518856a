//! Session state machine
//!
//! Pure state machine: receives events, returns the new state. The session
//! applies it under its lock and performs the I/O around it.
//!
//! Transitions:
//! - any → Disconnected (Reset)
//! - any → Authenticating (AttemptStarted)
//! - Authenticating → Authenticated (Succeeded)
//! - Authenticating → AuthenticationError (Failed)
//!
//! Access data from an earlier success is carried through `Authenticating`
//! and `AuthenticationError` as `retained`. It is not the session's access
//! (only `Authenticated` has one) and is dropped only by Reset.

use std::sync::Arc;

use crate::access::AccessData;

/// The four externally visible states, with their numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SessionStatus {
    Disconnected = 0,
    Authenticating = 1,
    Authenticated = 2,
    AuthenticationError = 3,
}

impl SessionStatus {
    pub const DISCONNECTED: u8 = SessionStatus::Disconnected as u8;
    pub const AUTHENTICATING: u8 = SessionStatus::Authenticating as u8;
    pub const AUTHENTICATED: u8 = SessionStatus::Authenticated as u8;
    pub const AUTHENTICATION_ERROR: u8 = SessionStatus::AuthenticationError as u8;

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Status label for logging and display.
    pub fn label(self) -> &'static str {
        match self {
            SessionStatus::Disconnected => "disconnected",
            SessionStatus::Authenticating => "authenticating",
            SessionStatus::Authenticated => "authenticated",
            SessionStatus::AuthenticationError => "authentication_error",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Disconnected,
    Authenticating {
        retained: Option<Arc<AccessData>>,
    },
    Authenticated {
        access: Arc<AccessData>,
    },
    AuthenticationError {
        retained: Option<Arc<AccessData>>,
    },
}

impl SessionState {
    pub fn status(&self) -> SessionStatus {
        match self {
            SessionState::Disconnected => SessionStatus::Disconnected,
            SessionState::Authenticating { .. } => SessionStatus::Authenticating,
            SessionState::Authenticated { .. } => SessionStatus::Authenticated,
            SessionState::AuthenticationError { .. } => SessionStatus::AuthenticationError,
        }
    }

    /// Access data, present only while authenticated.
    pub fn access(&self) -> Option<&Arc<AccessData>> {
        match self {
            SessionState::Authenticated { access } => Some(access),
            _ => None,
        }
    }

    /// Token id, present only while authenticated.
    pub fn token(&self) -> Option<&str> {
        self.access().map(|a| a.token.id.as_str())
    }

    /// Most recent access data obtained since the last reset, even if a
    /// later attempt is in flight or failed.
    pub fn last_access(&self) -> Option<&Arc<AccessData>> {
        match self {
            SessionState::Disconnected => None,
            SessionState::Authenticated { access } => Some(access),
            SessionState::Authenticating { retained }
            | SessionState::AuthenticationError { retained } => retained.as_ref(),
        }
    }

    fn into_retained(self) -> Option<Arc<AccessData>> {
        match self {
            SessionState::Disconnected => None,
            SessionState::Authenticated { access } => Some(access),
            SessionState::Authenticating { retained }
            | SessionState::AuthenticationError { retained } => retained,
        }
    }
}

/// Events that drive state transitions.
#[derive(Debug)]
pub enum SessionEvent {
    /// `init`: forget everything
    Reset,
    /// An authentication request is about to be sent
    AttemptStarted,
    /// The transport returned a usable token response
    Succeeded(Arc<AccessData>),
    /// The transport failed or the response was unusable
    Failed,
}

/// Handle a state transition. Pure function: no I/O.
pub fn transition(state: SessionState, event: SessionEvent) -> SessionState {
    match (state, event) {
        (_, SessionEvent::Reset) => SessionState::Disconnected,

        // Re-authentication is allowed from every state
        (state, SessionEvent::AttemptStarted) => SessionState::Authenticating {
            retained: state.into_retained(),
        },

        (SessionState::Authenticating { .. }, SessionEvent::Succeeded(access)) => {
            SessionState::Authenticated { access }
        }

        (SessionState::Authenticating { retained }, SessionEvent::Failed) => {
            SessionState::AuthenticationError { retained }
        }

        // Completions only apply while an attempt is outstanding
        (state, SessionEvent::Succeeded(_) | SessionEvent::Failed) => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn access(id: &str) -> Arc<AccessData> {
        let response = serde_json::json!({"access": {"token": {"id": id}}});
        Arc::new(AccessData::from_response(&response).unwrap())
    }

    /// token ⇔ access ⇔ Authenticated
    fn assert_invariant(state: &SessionState) {
        let authenticated = state.status() == SessionStatus::Authenticated;
        assert_eq!(state.access().is_some(), authenticated, "{state:?}");
        assert_eq!(state.token().is_some(), authenticated, "{state:?}");
    }

    #[test]
    fn status_codes_are_stable() {
        assert_eq!(SessionStatus::DISCONNECTED, 0);
        assert_eq!(SessionStatus::AUTHENTICATING, 1);
        assert_eq!(SessionStatus::AUTHENTICATED, 2);
        assert_eq!(SessionStatus::AUTHENTICATION_ERROR, 3);
        assert_eq!(SessionStatus::AuthenticationError.code(), 3);
    }

    #[test]
    fn default_state_is_disconnected() {
        let state = SessionState::default();
        assert_eq!(state.status(), SessionStatus::Disconnected);
        assert_invariant(&state);
        assert!(state.last_access().is_none());
    }

    #[test]
    fn disconnected_to_authenticating_on_attempt() {
        let state = transition(SessionState::Disconnected, SessionEvent::AttemptStarted);
        assert_eq!(state.status(), SessionStatus::Authenticating);
        assert_invariant(&state);
        assert!(state.last_access().is_none());
    }

    #[test]
    fn authenticating_to_authenticated_on_success() {
        let state = transition(
            SessionState::Authenticating { retained: None },
            SessionEvent::Succeeded(access("tok-1")),
        );
        assert_eq!(state.status(), SessionStatus::Authenticated);
        assert_eq!(state.token(), Some("tok-1"));
        assert_invariant(&state);
    }

    #[test]
    fn authenticating_to_error_on_failure() {
        let state = transition(
            SessionState::Authenticating { retained: None },
            SessionEvent::Failed,
        );
        assert_eq!(state.status(), SessionStatus::AuthenticationError);
        assert_invariant(&state);
    }

    #[test]
    fn failed_reauthentication_retains_previous_access() {
        let state = transition(
            SessionState::Authenticated {
                access: access("tok-1"),
            },
            SessionEvent::AttemptStarted,
        );
        assert_eq!(state.last_access().unwrap().token.id, "tok-1");
        assert_invariant(&state);

        let state = transition(state, SessionEvent::Failed);
        assert_eq!(state.status(), SessionStatus::AuthenticationError);
        assert_eq!(state.last_access().unwrap().token.id, "tok-1");
        assert_invariant(&state);

        // A further failed attempt still keeps it
        let state = transition(state, SessionEvent::AttemptStarted);
        let state = transition(state, SessionEvent::Failed);
        assert_eq!(state.last_access().unwrap().token.id, "tok-1");
    }

    #[test]
    fn successful_reauthentication_replaces_access() {
        let state = SessionState::Authenticated {
            access: access("tok-1"),
        };
        let state = transition(state, SessionEvent::AttemptStarted);
        let state = transition(state, SessionEvent::Succeeded(access("tok-2")));
        assert_eq!(state.token(), Some("tok-2"));
        assert_eq!(state.last_access().unwrap().token.id, "tok-2");
    }

    #[test]
    fn reset_wins_from_every_state() {
        let states = [
            SessionState::Disconnected,
            SessionState::Authenticating {
                retained: Some(access("a")),
            },
            SessionState::Authenticated {
                access: access("b"),
            },
            SessionState::AuthenticationError {
                retained: Some(access("c")),
            },
        ];
        for state in states {
            let state = transition(state, SessionEvent::Reset);
            assert_eq!(state.status(), SessionStatus::Disconnected);
            assert!(state.last_access().is_none());
            assert_invariant(&state);
        }
    }

    #[test]
    fn completions_outside_authenticating_are_ignored() {
        let state = transition(
            SessionState::Disconnected,
            SessionEvent::Succeeded(access("x")),
        );
        assert_eq!(state.status(), SessionStatus::Disconnected);

        let state = transition(
            SessionState::Authenticated {
                access: access("y"),
            },
            SessionEvent::Failed,
        );
        assert_eq!(state.token(), Some("y"));

        let state = transition(
            SessionState::AuthenticationError { retained: None },
            SessionEvent::Succeeded(access("z")),
        );
        assert_eq!(state.status(), SessionStatus::AuthenticationError);
    }

    #[test]
    fn labels_match_status() {
        assert_eq!(SessionStatus::Disconnected.label(), "disconnected");
        assert_eq!(SessionStatus::Authenticating.label(), "authenticating");
        assert_eq!(SessionStatus::Authenticated.label(), "authenticated");
        assert_eq!(
            SessionStatus::AuthenticationError.label(),
            "authentication_error"
        );
    }
}
