//! Terminal navigator: a forced screen change becomes a hint on stderr.

use session::{Navigator, Screen};

#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalNavigator;

/// Command that shows `screen` in this client.
pub fn command_for(screen: Screen) -> &'static str {
    match screen {
        Screen::Entry => "exam-cli login",
        Screen::Signup => "exam-cli signup",
        Screen::ForgotPassword => "exam-cli forgot-password",
        Screen::Home => "exam-cli notifications list",
        Screen::Profile => "exam-cli profile show",
        Screen::Admin => "exam-cli whoami",
        Screen::Contact => "exam-cli contact",
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, screen: Screen) {
        tracing::debug!(path = screen.path(), "navigate");
        eprintln!("-> {} (next: `{}`)", screen.path(), command_for(screen));
    }

    fn notify(&self, message: &str) {
        eprintln!("{message}");
    }
}
