//! Session data model.
//!
//! DESIGN
//! ======
//! A token without a user (or the reverse) is not representable: `Session`
//! carries an `Option<Credentials>` and every accessor derives from it.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Closed role set decided once at login.
///
/// The server's spelling varies (`"admin"`, `"ADMIN"`, `"Student"`), so role
/// names are matched case-insensitively on the way in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    /// Anonymous visitor.
    #[default]
    Guest,
    /// Regular signed-in learner.
    Member,
    /// Staff account with access to the admin surface.
    Admin,
}

const ROLE_NAMES: &[&str] = &["guest", "member", "user", "student", "admin"];

impl Role {
    /// Parse a wire role name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "guest" => Some(Self::Guest),
            "member" | "user" | "student" => Some(Self::Member),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Guest => "Guest",
            Self::Member => "Member",
            Self::Admin => "Admin",
        }
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| D::Error::unknown_variant(&raw, ROLE_NAMES))
    }
}

fn signed_in_role() -> Role {
    Role::Member
}

/// An authenticated user as returned by the auth and profile endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend user identifier. Numeric ids are accepted and stringified.
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    /// Display name.
    #[serde(rename = "name")]
    pub display_name: String,
    pub email: String,
    /// Missing roles on a signed-in user default to `Member`.
    #[serde(default = "signed_in_role")]
    pub role: Role,
}

pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(id) => Ok(id),
        serde_json::Value::Number(id) => Ok(id.to_string()),
        other => Err(D::Error::custom(format!("expected string or numeric id, got {other}"))),
    }
}

/// Bearer token and the user it was issued for. Always held together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    token: String,
    user: User,
}

/// The client's view of who is signed in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    credentials: Option<Credentials>,
}

impl Session {
    /// A session with no credential.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Build a signed-in session value.
    ///
    /// Only `SessionStore` persists sessions; values built here are for
    /// rendering and tests.
    #[must_use]
    pub fn authenticated(token: impl Into<String>, user: User) -> Self {
        Self { credentials: Some(Credentials { token: token.into(), user }) }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.token.as_str())
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.credentials.as_ref().map(|c| &c.user)
    }

    /// Role of the signed-in user, `Guest` when anonymous.
    #[must_use]
    pub fn role(&self) -> Role {
        self.user().map_or(Role::Guest, |u| u.role)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role().is_admin()
    }

    pub(crate) fn replace_user(&mut self, user: User) -> bool {
        match self.credentials.as_mut() {
            Some(credentials) => {
                credentials.user = user;
                true
            }
            None => false,
        }
    }
}
