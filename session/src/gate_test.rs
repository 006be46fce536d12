use super::*;
use crate::endpoints::{
    GetProfile, ListNotifications, Login, MarkAllNotificationsRead, NotificationFeed, ProfileEnvelope, SubmitContact,
};
use crate::store::{ClearReason, SessionEvent};
use crate::testing::{Harness, member};
use futures::future::join_all;
use serde_json::json;

fn contact() -> SubmitContact {
    SubmitContact { name: "Ana".to_owned(), email: "a@b.io".to_owned(), message: "hi".to_owned() }
}

// =============================================================
// AccessPolicy
// =============================================================

#[test]
fn default_policy_is_default_deny() {
    let policy = AccessPolicy::new(crate::config::DEFAULT_PUBLIC_ENDPOINTS);
    assert_eq!(policy.classify("/auth/login"), Access::Public);
    assert_eq!(policy.classify("/auth/register"), Access::Public);
    assert_eq!(policy.classify("/auth/password-reset-request"), Access::Public);
    assert_eq!(policy.classify("/contact"), Access::Public);
    assert_eq!(policy.classify("/profile"), Access::Protected);
    assert_eq!(policy.classify("/notifications/read-all"), Access::Protected);
    assert_eq!(policy.classify("/auth/logout"), Access::Protected);
    assert_eq!(policy.classify("/"), Access::Protected);
}

#[test]
fn exact_patterns_ignore_query_and_trailing_slash_but_not_suffixes() {
    let policy = AccessPolicy::new(["/auth/login"]);
    assert_eq!(policy.classify("/auth/login/"), Access::Public);
    assert_eq!(policy.classify("/auth/login?next=/admin"), Access::Public);
    assert_eq!(policy.classify("/auth/login-as-admin"), Access::Protected);
}

// =============================================================
// Pre-flight guard
// =============================================================

#[tokio::test]
async fn protected_call_without_session_never_hits_network() {
    let h = Harness::anonymous();

    assert_eq!(h.gate.send(&GetProfile).await, Err(GateError::Unauthenticated));
    assert_eq!(h.gate.fetch(&ListNotifications).await, NotificationFeed::default());
    assert_eq!(h.gate.fetch(&MarkAllNotificationsRead).await.updated, 0);

    assert_eq!(h.transport.calls(), 0);
    assert!(h.navigator.screens().is_empty());
    assert!(h.navigator.notices().is_empty());
}

#[tokio::test]
async fn protected_call_carries_bearer_token() {
    let h = Harness::signed_in(member());
    h.transport.respond(200, json!({ "profile": { "id": "u-1", "name": "Asha", "email": "asha@example.com" } }));

    let envelope = h.gate.send(&GetProfile).await.unwrap();
    assert_eq!(envelope.profile.name, "Asha");

    let sent = h.transport.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, Method::Get);
    assert_eq!(sent[0].url, "http://127.0.0.1:5000/api/profile");
    assert_eq!(sent[0].authorization().as_deref(), Some("Bearer tok-1"));
}

#[tokio::test]
async fn public_call_goes_out_without_credential() {
    let h = Harness::signed_in(member());
    h.transport.respond(200, json!({ "message": "thanks" }));

    let reply = h.gate.send(&contact()).await.unwrap();
    assert_eq!(reply.message, "thanks");
    assert_eq!(h.transport.requests()[0].bearer, None);
}

// =============================================================
// Response guard
// =============================================================

#[tokio::test]
async fn unauthorized_on_live_session_runs_recovery() {
    let h = Harness::signed_in(member());
    h.transport.respond(401, json!({ "message": "jwt expired" }));

    assert_eq!(h.gate.send(&GetProfile).await, Err(GateError::SessionExpired));
    assert!(!h.store.is_authenticated());
    assert_eq!(h.navigator.screens(), vec![Screen::Entry]);
    assert_eq!(h.navigator.notices(), vec![SESSION_EXPIRED_NOTICE.to_owned()]);
    assert_eq!(h.events(), vec![SessionEvent::Cleared(ClearReason::Expired)]);
}

#[tokio::test]
async fn concurrent_unauthorized_responses_recover_exactly_once() {
    let h = Harness::signed_in(member());
    h.transport.always(401, json!({ "error": "invalid token" }));

    let calls = (0..5).map(|_| h.gate.fetch(&GetProfile));
    let results = join_all(calls).await;

    assert_eq!(h.transport.calls(), 5);
    assert!(results.iter().all(|r| *r == ProfileEnvelope::default()));
    assert_eq!(h.navigator.screens(), vec![Screen::Entry]);
    assert_eq!(h.navigator.notices().len(), 1);
    assert_eq!(h.events(), vec![SessionEvent::Cleared(ClearReason::Expired)]);
}

#[tokio::test]
async fn concurrent_send_reports_expiry_to_every_caller() {
    let h = Harness::signed_in(member());
    h.transport.always(401, json!({}));

    let results = join_all((0..3).map(|_| h.gate.send(&ListNotifications))).await;
    assert!(results.iter().all(|r| *r == Err(GateError::SessionExpired)));
    assert_eq!(h.navigator.screens().len(), 1);
}

#[tokio::test]
async fn stale_unauthorized_after_relogin_keeps_new_session() {
    let h = Harness::signed_in(member());
    h.transport.respond(401, json!({}));

    let stale = h.gate.send(&GetProfile);
    let relogin = async {
        h.store.set_session("tok-2", member()).unwrap();
    };
    let (stale_result, ()) = futures::join!(stale, relogin);

    assert_eq!(stale_result, Err(GateError::SessionExpired));
    assert_eq!(h.store.get_session().token(), Some("tok-2"));
    assert!(h.navigator.screens().is_empty());
}

#[tokio::test]
async fn unauthorized_on_public_call_is_a_plain_rejection() {
    let h = Harness::anonymous();
    h.transport.respond(401, json!({ "message": "Invalid email or password" }));

    let result = h.gate.send(&Login { email: "a@b.io".to_owned(), password: "nope".to_owned() }).await;
    assert_eq!(
        result.err(),
        Some(GateError::Rejected { status: 401, message: "Invalid email or password".to_owned() })
    );
    assert!(h.navigator.screens().is_empty());
    assert!(h.events().is_empty());
}

#[tokio::test]
async fn server_error_uses_error_field_then_fallback() {
    let h = Harness::signed_in(member());
    h.transport.respond(422, json!({ "error": "bad field" }));
    h.transport.respond(503, json!({}));
    h.transport.respond(404, json!({}));

    assert_eq!(
        h.gate.send(&GetProfile).await,
        Err(GateError::Rejected { status: 422, message: "bad field".to_owned() })
    );
    assert!(matches!(
        h.gate.send(&GetProfile).await,
        Err(GateError::Rejected { status: 503, message }) if message.contains("server")
    ));
    assert_eq!(
        h.gate.send(&GetProfile).await,
        Err(GateError::Rejected { status: 404, message: "Request failed with status 404".to_owned() })
    );
    assert!(h.store.is_authenticated());
}

#[tokio::test]
async fn network_failure_is_normalized_and_fetch_substitutes() {
    let h = Harness::signed_in(member());
    h.transport.fail(TransportError::Timeout);
    h.transport.fail(TransportError::Request("connection refused".to_owned()));

    assert_eq!(h.gate.send(&GetProfile).await, Err(GateError::Network("request timed out".to_owned())));
    assert_eq!(h.gate.fetch(&ListNotifications).await, NotificationFeed::default());
    assert!(h.store.is_authenticated());
}

#[tokio::test]
async fn malformed_success_body_is_decode_error() {
    let h = Harness::signed_in(member());
    h.transport.respond(200, json!({ "notifications": "nope" }));
    assert!(matches!(h.gate.send(&ListNotifications).await, Err(GateError::Decode(_))));
}

#[tokio::test]
async fn revoke_sends_captured_token_without_session() {
    let h = Harness::anonymous();
    h.transport.respond(401, json!({}));

    h.gate.revoke("old-token".to_owned()).await;

    let sent = h.transport.requests();
    assert_eq!(sent[0].url, "http://127.0.0.1:5000/api/auth/logout");
    assert_eq!(sent[0].bearer.as_deref(), Some("old-token"));
    assert!(h.navigator.screens().is_empty());
}

#[test]
fn blank_message_falls_through_to_error_field() {
    let response = HttpResponse::new(400, r#"{"message":"  ","error":"Email already registered"}"#);
    assert_eq!(rejection_message(&response), "Email already registered");
}

#[test]
fn blank_message_and_error_use_status_fallback() {
    let response = HttpResponse::new(400, r#"{"message":"","error":" "}"#);
    assert_eq!(rejection_message(&response), "Request failed with status 400");
}
