//! Route guard: decides whether a protected screen renders for a session.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::model::Session;
use crate::navigation::Screen;

/// Result of evaluating a guarded route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(Screen),
}

impl GuardDecision {
    /// Evaluate a guarded route against the current session.
    ///
    /// Admin routes check the role first; every other route only needs a
    /// live session. Both failures land on the entry screen.
    #[must_use]
    pub fn decide(session: &Session, require_admin: bool) -> Self {
        if require_admin && !session.is_admin() {
            return Self::Redirect(Screen::Entry);
        }
        if !session.is_authenticated() {
            return Self::Redirect(Screen::Entry);
        }
        Self::Render
    }

    #[must_use]
    pub fn renders(self) -> bool {
        self == Self::Render
    }

    /// Public entry screens bounce signed-in users to where they belong.
    #[must_use]
    pub fn for_public_entry(session: &Session) -> Self {
        if !session.is_authenticated() {
            Self::Render
        } else if session.is_admin() {
            Self::Redirect(Screen::Admin)
        } else {
            Self::Redirect(Screen::Home)
        }
    }
}
