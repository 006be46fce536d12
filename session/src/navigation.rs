//! Screens the guard subsystem can send the user to.

/// User-visible notice shown once per detected session expiry.
pub const SESSION_EXPIRED_NOTICE: &str = "Your session has expired. Please sign in again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Login screen; every redirect for missing or lost auth lands here.
    Entry,
    Signup,
    ForgotPassword,
    Home,
    Profile,
    Admin,
    Contact,
}

impl Screen {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Entry => "/login",
            Self::Signup => "/signup",
            Self::ForgotPassword => "/forgot-password",
            Self::Home => "/dashboard",
            Self::Profile => "/profile",
            Self::Admin => "/admin",
            Self::Contact => "/contact",
        }
    }
}

/// Forced navigation and one-shot notices, owned by the shell.
pub trait Navigator: Send + Sync {
    fn navigate(&self, screen: Screen);
    fn notify(&self, message: &str);
}
