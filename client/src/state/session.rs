//! Session state published by the session gate.
//!
//! SYSTEM CONTEXT
//! ==============
//! The gate resolves this on every path change and provides it through
//! context so pages and chrome can render identity-dependent UI without
//! touching storage themselves.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::User;

/// Outcome of reading the token store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthStatus {
    Authenticated,
    Unauthenticated,
}

/// Gate lifecycle for the current path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GatePhase {
    Initializing,
    Resolved(AuthStatus),
}

/// Per-mount session snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub is_loading: bool,
    pub is_authenticated: bool,
    pub user: Option<User>,
}

impl SessionState {
    /// Resolved state. Authenticated only when a user accompanies the token.
    #[must_use]
    pub fn resolved(session: Option<(String, User)>) -> Self {
        match session {
            Some((_, user)) => Self { is_loading: false, is_authenticated: true, user: Some(user) },
            None => Self { is_loading: false, is_authenticated: false, user: None },
        }
    }

    #[must_use]
    pub fn phase(&self) -> GatePhase {
        if self.is_loading {
            GatePhase::Initializing
        } else if self.is_authenticated {
            GatePhase::Resolved(AuthStatus::Authenticated)
        } else {
            GatePhase::Resolved(AuthStatus::Unauthenticated)
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self { is_loading: true, is_authenticated: false, user: None }
    }
}
