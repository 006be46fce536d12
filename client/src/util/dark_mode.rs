//! Theme initialization and toggle.
//!
//! The stored choice lives in the shared `theme` preference key, next to the
//! session keys but never cleared with them. With no stored choice the
//! system color scheme decides. The theme is applied as a `data-theme`
//! attribute on `<html>`.
//!
//! TRADE-OFFS
//! ==========
//! Preference persistence is best-effort browser-only behavior; native
//! builds safely no-op so the helpers stay testable.

#[cfg(test)]
#[path = "dark_mode_test.rs"]
mod dark_mode_test;

use session::{Preferences, Theme};

/// Stored choice wins; otherwise follow the system scheme.
pub fn resolve(stored: Option<Theme>, system_prefers_dark: bool) -> Theme {
    stored.unwrap_or(if system_prefers_dark { Theme::Dark } else { Theme::Light })
}

fn system_prefers_dark() -> bool {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .is_some_and(|mq| mq.matches())
    }
    #[cfg(not(feature = "csr"))]
    {
        false
    }
}

/// Theme to start with.
pub fn read_preference(preferences: &Preferences) -> Theme {
    resolve(preferences.theme(), system_prefers_dark())
}

/// Apply the `data-theme` attribute on the `<html>` element.
pub fn apply(theme: Theme) {
    #[cfg(feature = "csr")]
    {
        if let Some(el) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.document_element()) {
            let _ = el.set_attribute("data-theme", theme.as_str());
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = theme;
    }
}

/// Flip the theme, apply it, and persist the new choice.
pub fn toggle(preferences: &Preferences, current: Theme) -> Theme {
    let next = current.toggled();
    apply(next);
    preferences.set_theme(next);
    next
}
