use super::*;
use crate::testing::{admin, member};

#[test]
fn anonymous_visitor_is_redirected_to_entry() {
    let session = Session::anonymous();
    assert_eq!(GuardDecision::decide(&session, false), GuardDecision::Redirect(Screen::Entry));
    assert_eq!(GuardDecision::decide(&session, true), GuardDecision::Redirect(Screen::Entry));
}

#[test]
fn member_renders_plain_route_but_not_admin_route() {
    let session = Session::authenticated("tok", member());
    assert!(GuardDecision::decide(&session, false).renders());
    assert_eq!(GuardDecision::decide(&session, true), GuardDecision::Redirect(Screen::Entry));
}

#[test]
fn admin_renders_everything() {
    let session = Session::authenticated("tok", admin());
    assert!(GuardDecision::decide(&session, false).renders());
    assert!(GuardDecision::decide(&session, true).renders());
}

#[test]
fn entry_screens_bounce_signed_in_users() {
    assert!(GuardDecision::for_public_entry(&Session::anonymous()).renders());
    assert_eq!(
        GuardDecision::for_public_entry(&Session::authenticated("tok", member())),
        GuardDecision::Redirect(Screen::Home)
    );
    assert_eq!(
        GuardDecision::for_public_entry(&Session::authenticated("tok", admin())),
        GuardDecision::Redirect(Screen::Admin)
    );
}
