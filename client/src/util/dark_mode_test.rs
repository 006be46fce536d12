use super::*;
use session::MemoryStore;
use std::sync::Arc;

#[test]
fn stored_theme_beats_system_scheme() {
    assert_eq!(resolve(Some(Theme::Light), true), Theme::Light);
    assert_eq!(resolve(Some(Theme::Dark), false), Theme::Dark);
}

#[test]
fn system_scheme_decides_without_stored_theme() {
    assert_eq!(resolve(None, true), Theme::Dark);
    assert_eq!(resolve(None, false), Theme::Light);
}

#[cfg(not(feature = "csr"))]
#[test]
fn read_preference_is_light_without_a_browser() {
    let prefs = Preferences::new(Arc::new(MemoryStore::new()));
    assert_eq!(read_preference(&prefs), Theme::Light);
}

#[test]
fn toggle_flips_and_persists() {
    let prefs = Preferences::new(Arc::new(MemoryStore::new()));
    assert_eq!(toggle(&prefs, Theme::Light), Theme::Dark);
    assert_eq!(prefs.theme(), Some(Theme::Dark));
    assert_eq!(toggle(&prefs, Theme::Dark), Theme::Light);
    assert_eq!(prefs.theme(), Some(Theme::Light));
}
