//! Shell Controller: guest vs. signed-in chrome and the logout action.
//!
//! DESIGN
//! ======
//! `logout()` is synchronous: it clears the store and navigates before
//! anything touches the network. The server-side sign-out is handed back as
//! a `SignOut` value for the caller to spawn, carrying the token captured
//! before the clear. A second `logout()` finds nothing to clear and returns
//! `None` without navigating.

#[cfg(test)]
#[path = "shell_test.rs"]
mod shell_test;

use std::fmt;
use std::sync::Arc;

use crate::gate::RequestGate;
use crate::model::Session;
use crate::navigation::Screen;
use crate::store::Subscription;

/// One entry in the navigation chrome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub screen: Screen,
}

const GUEST_LINKS: [NavLink; 3] = [
    NavLink { label: "Login", screen: Screen::Entry },
    NavLink { label: "Sign up", screen: Screen::Signup },
    NavLink { label: "Contact", screen: Screen::Contact },
];

const MEMBER_LINKS: [NavLink; 2] = [
    NavLink { label: "Dashboard", screen: Screen::Home },
    NavLink { label: "Profile", screen: Screen::Profile },
];

const ADMIN_LINK: NavLink = NavLink { label: "Admin", screen: Screen::Admin };

/// Links to show for a session.
#[must_use]
pub fn nav_links(session: &Session) -> Vec<NavLink> {
    if !session.is_authenticated() {
        return GUEST_LINKS.to_vec();
    }
    let mut links = MEMBER_LINKS.to_vec();
    if session.is_admin() {
        links.push(ADMIN_LINK);
    }
    links
}

/// Header label for the signed-in user, falling back to the email.
#[must_use]
pub fn greeting(session: &Session) -> Option<String> {
    let user = session.user()?;
    let name = user.display_name.trim();
    Some(if name.is_empty() { user.email.clone() } else { name.to_owned() })
}

/// Pending server-side sign-out for a session that is already cleared locally.
#[must_use = "the server-side sign-out only happens when `send` is awaited"]
pub struct SignOut {
    gate: Arc<RequestGate>,
    token: String,
}

impl SignOut {
    pub async fn send(self) {
        self.gate.revoke(self.token).await;
    }
}

impl fmt::Debug for SignOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignOut").finish_non_exhaustive()
    }
}

pub struct ShellController {
    gate: Arc<RequestGate>,
}

impl ShellController {
    pub fn new(gate: Arc<RequestGate>) -> Self {
        Self { gate }
    }

    #[must_use]
    pub fn session(&self) -> Session {
        self.gate.store().get_session()
    }

    /// Call `render` with the latest session after every store change,
    /// including profile edits made elsewhere.
    pub fn on_session_change(&self, render: impl Fn(&Session) + Send + Sync + 'static) -> Subscription {
        let store = self.gate.store().clone();
        self.gate.store().subscribe(move |_| render(&store.get_session()))
    }

    /// Clear the session, go to the entry screen, and hand back the
    /// server-side sign-out. Returns `None` if nobody was signed in.
    pub fn logout(&self) -> Option<SignOut> {
        let removed = self.gate.store().clear_session()?;
        tracing::info!("signed out");
        self.gate.navigator().navigate(Screen::Entry);
        let token = removed.token()?.to_owned();
        Some(SignOut { gate: self.gate.clone(), token })
    }
}
