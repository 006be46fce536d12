use super::*;

#[test]
fn memory_store_set_get_remove() {
    let store = MemoryStore::new();
    assert_eq!(store.get("token"), None);

    store.set("token", "abc");
    assert_eq!(store.get("token"), Some("abc".to_owned()));

    store.remove("token");
    assert_eq!(store.get("token"), None);
}

#[test]
fn seeded_store_snapshot_is_sorted() {
    let store = MemoryStore::with_entries([("theme", "dark"), ("token", "t")]);
    let keys: Vec<_> = store.snapshot().into_keys().collect();
    assert_eq!(keys, vec!["theme".to_owned(), "token".to_owned()]);
}

#[test]
fn session_keys_exclude_preferences() {
    assert!(!keys::SESSION.contains(&keys::THEME));
    assert!(!keys::SESSION.contains(&keys::SIDEBAR_COLLAPSED));
    assert!(keys::SESSION.contains(&keys::TOKEN));
}
