//! Typed catalogue of the REST endpoints the client consumes.
//!
//! DESIGN
//! ======
//! An endpoint only names its method, path, body and response type. Whether
//! it needs a credential is decided by the Request Gate's allow-list, never
//! by the endpoint itself. Response types used by background calls implement
//! `Default`; that default is the safe empty substitute.

#[cfg(test)]
#[path = "endpoints_test.rs"]
mod endpoints_test;

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::model::{Role, User};
use crate::transport::Method;

pub trait Endpoint {
    type Output: DeserializeOwned;
    const METHOD: Method;

    fn path(&self) -> String;

    fn body(&self) -> Option<serde_json::Value> {
        None
    }
}

// =============================================================================
// RESPONSE TYPES
// =============================================================================

/// Success body of login and registration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Generic `{message}` acknowledgement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    #[serde(alias = "_id", deserialize_with = "crate::model::deserialize_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Option<Role>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

impl Profile {
    /// User fields to push into the session after a profile edit. The role
    /// here is a placeholder; `SessionStore::update_user` keeps the sign-in role.
    #[must_use]
    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            display_name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.unwrap_or(Role::Member),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileEnvelope {
    #[serde(default)]
    pub profile: Profile,
}

/// Editable profile fields; absent fields are left unchanged server-side.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notification {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub message: String,
    pub read: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationFeed {
    pub notifications: Vec<Notification>,
    pub unread: u32,
}

/// Counter returned by notification mutations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationAck {
    pub updated: u32,
}

// =============================================================================
// AUTH
// =============================================================================

pub struct Login {
    pub email: String,
    pub password: String,
}

impl Endpoint for Login {
    type Output = AuthResponse;
    const METHOD: Method = Method::Post;

    fn path(&self) -> String {
        "/auth/login".to_owned()
    }

    fn body(&self) -> Option<serde_json::Value> {
        Some(json!({ "email": self.email, "password": self.password }))
    }
}

pub struct Register {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Endpoint for Register {
    type Output = AuthResponse;
    const METHOD: Method = Method::Post;

    fn path(&self) -> String {
        "/auth/register".to_owned()
    }

    fn body(&self) -> Option<serde_json::Value> {
        Some(json!({ "name": self.name, "email": self.email, "password": self.password }))
    }
}

pub struct RequestPasswordReset {
    pub email: String,
}

impl Endpoint for RequestPasswordReset {
    type Output = MessageResponse;
    const METHOD: Method = Method::Post;

    fn path(&self) -> String {
        "/auth/password-reset-request".to_owned()
    }

    fn body(&self) -> Option<serde_json::Value> {
        Some(json!({ "email": self.email }))
    }
}

/// Server-side sign-out. Sent with the credential captured before the local
/// clear, so it bypasses the pre-flight guard.
pub struct Logout;

impl Endpoint for Logout {
    type Output = IgnoredAny;
    const METHOD: Method = Method::Post;

    fn path(&self) -> String {
        "/auth/logout".to_owned()
    }
}

// =============================================================================
// PROFILE
// =============================================================================

pub struct GetProfile;

impl Endpoint for GetProfile {
    type Output = ProfileEnvelope;
    const METHOD: Method = Method::Get;

    fn path(&self) -> String {
        "/profile".to_owned()
    }
}

pub struct UpdateProfile(pub ProfileUpdate);

impl Endpoint for UpdateProfile {
    type Output = ProfileEnvelope;
    const METHOD: Method = Method::Put;

    fn path(&self) -> String {
        "/profile".to_owned()
    }

    fn body(&self) -> Option<serde_json::Value> {
        serde_json::to_value(&self.0).ok()
    }
}

// =============================================================================
// CONTACT
// =============================================================================

#[derive(Debug)]
pub struct SubmitContact {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Endpoint for SubmitContact {
    type Output = MessageResponse;
    const METHOD: Method = Method::Post;

    fn path(&self) -> String {
        "/contact".to_owned()
    }

    fn body(&self) -> Option<serde_json::Value> {
        Some(json!({ "name": self.name, "email": self.email, "message": self.message }))
    }
}

// =============================================================================
// NOTIFICATIONS
// =============================================================================

pub struct ListNotifications;

impl Endpoint for ListNotifications {
    type Output = NotificationFeed;
    const METHOD: Method = Method::Get;

    fn path(&self) -> String {
        "/notifications".to_owned()
    }
}

pub struct MarkNotificationRead {
    pub id: String,
}

impl Endpoint for MarkNotificationRead {
    type Output = NotificationAck;
    const METHOD: Method = Method::Post;

    fn path(&self) -> String {
        format!("/notifications/{}/read", self.id)
    }
}

pub struct MarkAllNotificationsRead;

impl Endpoint for MarkAllNotificationsRead {
    type Output = NotificationAck;
    const METHOD: Method = Method::Post;

    fn path(&self) -> String {
        "/notifications/read-all".to_owned()
    }
}

pub struct DismissNotification {
    pub id: String,
}

impl Endpoint for DismissNotification {
    type Output = NotificationAck;
    const METHOD: Method = Method::Delete;

    fn path(&self) -> String {
        format!("/notifications/{}", self.id)
    }
}
