//! Authentication flows: login, signup, password-reset request.
//!
//! SYSTEM CONTEXT
//! ==============
//! Forms validate locally, then call into `Authenticator`, which talks to
//! the auth endpoints through the Request Gate and writes the Session Store
//! on success. Nothing else in the crate signs a user in.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use crate::endpoints::{Login, ProfileUpdate, Register, RequestPasswordReset, UpdateProfile};
use crate::endpoints::{AuthResponse, Profile};
use crate::forms::{LoginCredentials, LoginForm, ResetForm, SignupDetails, SignupForm};
use crate::gate::{GateError, RequestGate};
use crate::model::Session;
use crate::navigation::Screen;
use crate::store::SessionError;

/// Why a login or signup did not produce a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Gate(#[from] GateError),
    #[error("the server returned an unusable session: {0}")]
    InvalidSession(#[from] SessionError),
}

/// Where a successful login sent the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Landing {
    /// Admin accounts go straight to the admin surface.
    Admin,
    /// The caller's post-login callback ran.
    Callback,
}

pub struct Authenticator {
    gate: Arc<RequestGate>,
}

impl Authenticator {
    pub fn new(gate: Arc<RequestGate>) -> Self {
        Self { gate }
    }

    pub fn gate(&self) -> &Arc<RequestGate> {
        &self.gate
    }

    /// Exchange credentials for a session and store it.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Gate`] for rejected or failed calls and
    /// [`AuthError::InvalidSession`] if the response lacks a usable token/user.
    /// The session is untouched on error.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<Session, AuthError> {
        let endpoint = Login { email: credentials.email.clone(), password: credentials.password.clone() };
        let response = self.gate.send(&endpoint).await?;
        self.establish(response)
    }

    /// Register an account and sign it in.
    ///
    /// # Errors
    ///
    /// Same as [`Authenticator::login`].
    pub async fn signup(&self, details: &SignupDetails) -> Result<Session, AuthError> {
        let endpoint =
            Register { name: details.name.clone(), email: details.email.clone(), password: details.password.clone() };
        let response = self.gate.send(&endpoint).await?;
        self.establish(response)
    }

    /// Ask the server to send a reset link. Returns the server's message.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`GateError`] on failure.
    pub async fn request_password_reset(&self, email: &str) -> Result<String, GateError> {
        let reply = self.gate.send(&RequestPasswordReset { email: email.to_owned() }).await?;
        if reply.message.trim().is_empty() {
            Ok("If that address is registered, a reset link is on its way.".to_owned())
        } else {
            Ok(reply.message)
        }
    }

    /// Post-login routing: admins navigate to the admin surface and skip the
    /// generic callback; everyone else gets `on_success`.
    pub fn land(&self, session: &Session, on_success: impl FnOnce(&Session)) -> Landing {
        if session.is_admin() {
            self.gate.navigator().navigate(Screen::Admin);
            Landing::Admin
        } else {
            on_success(session);
            Landing::Callback
        }
    }

    /// Record a login result on `form` and, on success, land the user.
    ///
    /// Split from [`Authenticator::submit_login`] so UI code that cannot hold
    /// the form across the await (reactive signals) runs the same steps.
    pub fn finish_login(
        &self,
        form: &mut LoginForm,
        result: Result<Session, AuthError>,
        on_success: impl FnOnce(&Session),
    ) -> Option<Landing> {
        if let Err(e) = &result {
            tracing::info!(error = %e, "login failed");
        }
        let session = form.finish(result)?;
        Some(self.land(&session, on_success))
    }

    /// Record a signup result on `form`; `on_success` runs once the session
    /// is stored.
    pub fn finish_signup(
        &self,
        form: &mut SignupForm,
        result: Result<Session, AuthError>,
        on_success: impl FnOnce(&Session),
    ) -> Option<Session> {
        if let Err(e) = &result {
            tracing::info!(error = %e, "signup failed");
        }
        let session = form.finish(result)?;
        on_success(&session);
        Some(session)
    }

    /// Record a password-reset result on `form`.
    pub fn finish_password_reset(&self, form: &mut ResetForm, result: Result<String, GateError>) -> bool {
        if let Err(e) = &result {
            tracing::info!(error = %e, "password reset request failed");
        }
        form.finish(result)
    }

    /// Drive a login form through validation, submission and landing.
    ///
    /// Returns `None` when validation failed, a submission was already in
    /// flight, or the service rejected the credentials (the form then holds
    /// the message).
    pub async fn submit_login(&self, form: &mut LoginForm, on_success: impl FnOnce(&Session)) -> Option<Landing> {
        let credentials = form.begin_submit()?;
        let result = self.login(&credentials).await;
        self.finish_login(form, result, on_success)
    }

    /// Drive a signup form; `on_success` runs once the session is stored.
    pub async fn submit_signup(&self, form: &mut SignupForm, on_success: impl FnOnce(&Session)) -> Option<Session> {
        let details = form.begin_submit()?;
        let result = self.signup(&details).await;
        self.finish_signup(form, result, on_success)
    }

    /// Drive the forgot-password form. Returns whether the request succeeded.
    pub async fn submit_password_reset(&self, form: &mut ResetForm) -> bool {
        let Some(email) = form.begin_submit() else {
            return false;
        };
        let result = self.request_password_reset(&email).await;
        self.finish_password_reset(form, result)
    }

    /// Save profile edits and broadcast the refreshed user to subscribers.
    ///
    /// # Errors
    ///
    /// Returns the normalized [`GateError`]; the session is untouched on error.
    pub async fn save_profile(&self, update: ProfileUpdate) -> Result<Profile, GateError> {
        let envelope = self.gate.send(&UpdateProfile(update)).await?;
        if !self.gate.store().update_user(envelope.profile.to_user()) {
            tracing::warn!("profile saved but the session ended before it could be refreshed");
        }
        Ok(envelope.profile)
    }

    fn establish(&self, response: AuthResponse) -> Result<Session, AuthError> {
        Ok(self.gate.store().set_session(&response.token, response.user)?)
    }
}
