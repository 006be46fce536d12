//! UI preferences that share the session's storage but not its lifecycle.

#[cfg(test)]
#[path = "preferences_test.rs"]
mod preferences_test;

use std::sync::Arc;

use crate::storage::{KeyValueStore, keys};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Theme and sidebar state. Session clears never touch these keys.
#[derive(Clone)]
pub struct Preferences {
    storage: Arc<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Stored theme, or `None` when the user never picked one.
    #[must_use]
    pub fn theme(&self) -> Option<Theme> {
        self.storage.get(keys::THEME).as_deref().and_then(Theme::parse)
    }

    pub fn set_theme(&self, theme: Theme) {
        self.storage.set(keys::THEME, theme.as_str());
    }

    #[must_use]
    pub fn sidebar_collapsed(&self) -> bool {
        self.storage.get(keys::SIDEBAR_COLLAPSED).is_some_and(|v| v == "true")
    }

    pub fn set_sidebar_collapsed(&self, collapsed: bool) {
        self.storage.set(keys::SIDEBAR_COLLAPSED, if collapsed { "true" } else { "false" });
    }
}
