use super::*;
use crate::testing::{Harness, admin, member};
use serde_json::json;
use std::sync::Mutex;

#[test]
fn guest_sees_entry_links() {
    let labels: Vec<_> = nav_links(&Session::anonymous()).iter().map(|l| l.label).collect();
    assert_eq!(labels, ["Login", "Sign up", "Contact"]);
}

#[test]
fn member_and_admin_links_differ_only_by_admin_entry() {
    let member_links = nav_links(&Session::authenticated("tok", member()));
    let admin_links = nav_links(&Session::authenticated("tok", admin()));
    assert_eq!(member_links.iter().map(|l| l.screen).collect::<Vec<_>>(), [Screen::Home, Screen::Profile]);
    assert_eq!(admin_links.last().map(|l| l.screen), Some(Screen::Admin));
    assert_eq!(admin_links.len(), member_links.len() + 1);
}

#[test]
fn greeting_falls_back_to_email() {
    let mut user = member();
    assert_eq!(greeting(&Session::authenticated("tok", user.clone())).as_deref(), Some("Asha"));
    user.display_name = " ".to_owned();
    assert_eq!(greeting(&Session::authenticated("tok", user)).as_deref(), Some("asha@example.com"));
    assert_eq!(greeting(&Session::anonymous()), None);
}

#[tokio::test]
async fn logout_clears_before_any_network_call() {
    let h = Harness::signed_in(member());
    let shell = ShellController::new(h.gate.clone());

    let sign_out = shell.logout().unwrap();

    assert!(!h.store.is_authenticated());
    assert_eq!(h.navigator.screens(), vec![Screen::Entry]);
    assert_eq!(h.transport.calls(), 0);

    sign_out.send().await;
    let sent = h.transport.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].bearer.as_deref(), Some("tok-1"));
}

#[test]
fn logout_twice_navigates_once() {
    let h = Harness::signed_in(member());
    let shell = ShellController::new(h.gate.clone());

    assert!(shell.logout().is_some());
    assert!(shell.logout().is_none());

    assert_eq!(h.navigator.screens(), vec![Screen::Entry]);
    assert!(!h.store.is_authenticated());
}

#[test]
fn logout_when_anonymous_does_nothing_visible() {
    let h = Harness::anonymous();
    let shell = ShellController::new(h.gate.clone());
    assert!(shell.logout().is_none());
    assert!(h.navigator.screens().is_empty());
    assert_eq!(h.transport.calls(), 0);
}

#[tokio::test]
async fn failed_server_sign_out_is_ignored() {
    let h = Harness::signed_in(member());
    h.transport.respond(500, json!({ "error": "boom" }));
    let shell = ShellController::new(h.gate.clone());

    shell.logout().unwrap().send().await;

    assert_eq!(h.navigator.screens(), vec![Screen::Entry]);
    assert!(h.navigator.notices().is_empty());
}

#[test]
fn session_change_listener_sees_profile_edits() {
    let h = Harness::signed_in(member());
    let shell = ShellController::new(h.gate.clone());
    let names = Arc::new(Mutex::new(Vec::new()));
    let sink = names.clone();
    shell.on_session_change(move |s| sink.lock().unwrap().push(greeting(s)));

    let mut edited = member();
    edited.display_name = "Asha K".to_owned();
    h.store.update_user(edited);
    let _ = shell.logout();

    assert_eq!(*names.lock().unwrap(), vec![Some("Asha K".to_owned()), None]);
}
