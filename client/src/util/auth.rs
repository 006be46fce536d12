//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components and forms apply identical redirect and error-display
//! behavior through these helpers.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use session::forms::{Field, FormStatus};
use session::{GuardDecision, Screen};

/// Perform navigation requested by code running outside the component tree.
///
/// Must be installed inside `<Router>`. Forced moves replace the history
/// entry so Back does not return to a screen the user lost access to.
pub fn install_navigation_bridge<F>(pending: RwSignal<Option<Screen>>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(screen) = pending.get() {
            pending.set(None);
            navigate(screen.path(), NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}

/// Path to redirect to, if the guard does not render.
pub fn redirect_path(decision: GuardDecision) -> Option<&'static str> {
    match decision {
        GuardDecision::Render => None,
        GuardDecision::Redirect(screen) => Some(screen.path()),
    }
}

/// First error message for `field`, or an empty string for the template.
pub fn field_message(status: &FormStatus, field: Field) -> String {
    status.errors().first(field).unwrap_or_default()
}

/// Submit button label for the current phase.
pub fn submit_label(status: &FormStatus, idle: &'static str) -> &'static str {
    if status.is_submitting() { "Please wait..." } else { idle }
}
