use super::*;
use crate::storage::MemoryStore;
use crate::testing::{Harness, member};

#[test]
fn unset_theme_reads_as_none() {
    let prefs = Preferences::new(Arc::new(MemoryStore::new()));
    assert_eq!(prefs.theme(), None);
    assert!(!prefs.sidebar_collapsed());
}

#[test]
fn unknown_theme_value_is_ignored() {
    let prefs = Preferences::new(Arc::new(MemoryStore::with_entries([(keys::THEME, "solarized")])));
    assert_eq!(prefs.theme(), None);
}

#[test]
fn theme_toggle_persists() {
    let prefs = Preferences::new(Arc::new(MemoryStore::new()));
    prefs.set_theme(Theme::default().toggled());
    assert_eq!(prefs.theme(), Some(Theme::Dark));
    prefs.set_sidebar_collapsed(true);
    assert!(prefs.sidebar_collapsed());
}

#[test]
fn preferences_survive_logout_and_expiry() {
    let h = Harness::signed_in(member());
    let prefs = Preferences::new(h.storage.clone());
    prefs.set_theme(Theme::Dark);
    prefs.set_sidebar_collapsed(true);

    h.store.clear_session();
    h.store.set_session("tok-2", member()).unwrap();
    let generation = h.store.generation().unwrap();
    h.store.expire(generation);

    assert_eq!(prefs.theme(), Some(Theme::Dark));
    assert!(prefs.sidebar_collapsed());
}
