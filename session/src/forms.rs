//! Auth form state machines (login, signup, forgot-password) and the contact
//! form check.
//!
//! Phases run `Editing -> Validating -> Submitting -> {Success, Failed}`.
//! Validation is local and never reaches the network. A failed submission
//! leaves the form editable with a form-level message.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::endpoints::SubmitContact;

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_PASSWORD_CHARS: usize = 8;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Editing,
    Validating,
    Submitting,
    Success,
    /// Editing with the service's error shown as the form-level message.
    /// Fields stay editable and the form may be resubmitted; the first edit
    /// moves it back to `Editing`.
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
    AcceptTerms,
    Message,
}

impl Field {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "password confirmation",
            Self::AcceptTerms => "terms",
            Self::Message => "message",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("This field is required")]
    Required,
    #[error("Must be at least {min} characters")]
    TooShort { min: usize },
    #[error("Enter a valid email address")]
    InvalidEmail,
    #[error("Must contain an uppercase letter")]
    MissingUppercase,
    #[error("Must contain a number")]
    MissingDigit,
    #[error("Passwords do not match")]
    Mismatch,
    #[error("You must accept the terms and conditions")]
    TermsNotAccepted,
}

/// Per-field validation failures.
#[derive(Clone, Debug, Default, PartialEq, Eq, thiserror::Error)]
#[error("{} field(s) need attention", .0.len())]
pub struct ValidationErrors(BTreeMap<Field, Vec<FieldError>>);

impl ValidationErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with at least one error.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, field: Field) -> &[FieldError] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    /// First message for a field, for single-line rendering.
    #[must_use]
    pub fn first(&self, field: Field) -> Option<String> {
        self.get(field).first().map(ToString::to_string)
    }

    /// Every error in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.0.iter().flat_map(|(field, errors)| errors.iter().map(move |e| (*field, e)))
    }

    pub fn push(&mut self, field: Field, error: FieldError) {
        self.0.entry(field).or_default().push(error);
    }

    pub fn clear_field(&mut self, field: Field) {
        self.0.remove(&field);
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Unmet password requirements, each reported on its own.
#[must_use]
pub fn password_requirements(password: &str) -> Vec<FieldError> {
    let mut unmet = Vec::new();
    if password.chars().count() < MIN_PASSWORD_CHARS {
        unmet.push(FieldError::TooShort { min: MIN_PASSWORD_CHARS });
    }
    if !password.chars().any(char::is_uppercase) {
        unmet.push(FieldError::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        unmet.push(FieldError::MissingDigit);
    }
    unmet
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

// =============================================================================
// SHARED PHASE HANDLING
// =============================================================================

/// Phase, errors and form-level message shared by every auth form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormStatus {
    phase: FormPhase,
    errors: ValidationErrors,
    message: Option<String>,
}

impl FormStatus {
    #[must_use]
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Form-level message (service error or confirmation).
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Submit control should be disabled.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    fn edited(&mut self, field: Field) {
        self.errors.clear_field(field);
        if self.phase == FormPhase::Failed {
            self.phase = FormPhase::Editing;
        }
    }

    /// Run validation; on success move to `Submitting` and return the payload.
    fn validate<T>(&mut self, validate: impl FnOnce() -> Result<T, ValidationErrors>) -> Option<T> {
        if self.is_submitting() {
            return None;
        }
        self.phase = FormPhase::Validating;
        self.message = None;
        match validate() {
            Ok(payload) => {
                self.errors = ValidationErrors::default();
                self.phase = FormPhase::Submitting;
                Some(payload)
            }
            Err(errors) => {
                self.errors = errors;
                self.phase = FormPhase::Editing;
                None
            }
        }
    }

    fn finish<T, E: fmt::Display>(&mut self, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => {
                self.phase = FormPhase::Success;
                Some(value)
            }
            Err(e) => {
                self.message = Some(e.to_string());
                self.phase = FormPhase::Failed;
                None
            }
        }
    }
}

// =============================================================================
// LOGIN
// =============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials").field("email", &self.email).finish_non_exhaustive()
    }
}

/// Validate login input: both fields required.
///
/// # Errors
///
/// Returns per-field [`FieldError::Required`] for each blank field.
pub fn validate_login(email: &str, password: &str) -> Result<LoginCredentials, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let email = email.trim();
    if email.is_empty() {
        errors.push(Field::Email, FieldError::Required);
    }
    if password.is_empty() {
        errors.push(Field::Password, FieldError::Required);
    }
    errors.into_result()?;
    Ok(LoginCredentials { email: email.to_owned(), password: password.to_owned() })
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    email: String,
    password: String,
    status: FormStatus,
}

impl LoginForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    #[must_use]
    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
        self.status.edited(Field::Email);
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
        self.status.edited(Field::Password);
    }

    /// Validate and enter `Submitting`. `None` means stay put: either field
    /// errors were recorded or a submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<LoginCredentials> {
        let (email, password) = (&self.email, &self.password);
        self.status.validate(|| validate_login(email, password))
    }

    pub fn finish<T, E: fmt::Display>(&mut self, result: Result<T, E>) -> Option<T> {
        self.status.finish(result)
    }
}

// =============================================================================
// SIGNUP
// =============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct SignupDetails {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SignupDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupDetails")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Raw signup input as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accept_terms: bool,
}

/// Validate signup input.
///
/// # Errors
///
/// Returns every failed requirement keyed by field; password requirements
/// (length, uppercase, digit) are listed individually.
pub fn validate_signup(input: &SignupInput) -> Result<SignupDetails, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let name = input.name.trim();
    if name.is_empty() {
        errors.push(Field::Name, FieldError::Required);
    } else if name.chars().count() < MIN_NAME_CHARS {
        errors.push(Field::Name, FieldError::TooShort { min: MIN_NAME_CHARS });
    }

    let email = input.email.trim();
    if email.is_empty() {
        errors.push(Field::Email, FieldError::Required);
    } else if !is_valid_email(email) {
        errors.push(Field::Email, FieldError::InvalidEmail);
    }

    if input.password.is_empty() {
        errors.push(Field::Password, FieldError::Required);
    } else {
        for unmet in password_requirements(&input.password) {
            errors.push(Field::Password, unmet);
        }
    }

    if input.confirm_password.is_empty() {
        errors.push(Field::ConfirmPassword, FieldError::Required);
    } else if input.confirm_password != input.password {
        errors.push(Field::ConfirmPassword, FieldError::Mismatch);
    }

    if !input.accept_terms {
        errors.push(Field::AcceptTerms, FieldError::TermsNotAccepted);
    }

    errors.into_result()?;
    Ok(SignupDetails { name: name.to_owned(), email: email.to_owned(), password: input.password.clone() })
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupForm {
    input: SignupInput,
    status: FormStatus,
}

impl SignupForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn input(&self) -> &SignupInput {
        &self.input
    }

    #[must_use]
    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.input.name = value.into();
        self.status.edited(Field::Name);
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.input.email = value.into();
        self.status.edited(Field::Email);
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.input.password = value.into();
        self.status.edited(Field::Password);
    }

    pub fn set_confirm_password(&mut self, value: impl Into<String>) {
        self.input.confirm_password = value.into();
        self.status.edited(Field::ConfirmPassword);
    }

    pub fn set_accept_terms(&mut self, accepted: bool) {
        self.input.accept_terms = accepted;
        self.status.edited(Field::AcceptTerms);
    }

    pub fn begin_submit(&mut self) -> Option<SignupDetails> {
        let input = &self.input;
        self.status.validate(|| validate_signup(input))
    }

    pub fn finish<T, E: fmt::Display>(&mut self, result: Result<T, E>) -> Option<T> {
        self.status.finish(result)
    }
}

// =============================================================================
// FORGOT PASSWORD
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResetForm {
    email: String,
    status: FormStatus,
}

impl ResetForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
        self.status.edited(Field::Email);
    }

    pub fn begin_submit(&mut self) -> Option<String> {
        let email = self.email.trim().to_owned();
        self.status.validate(|| {
            let mut errors = ValidationErrors::default();
            if email.is_empty() {
                errors.push(Field::Email, FieldError::Required);
            } else if !is_valid_email(&email) {
                errors.push(Field::Email, FieldError::InvalidEmail);
            }
            errors.into_result().map(|()| email)
        })
    }

    /// Finish with the server's confirmation text shown as the form message.
    pub fn finish<E: fmt::Display>(&mut self, result: Result<String, E>) -> bool {
        match self.status.finish(result) {
            Some(confirmation) => {
                self.status.message = Some(confirmation);
                true
            }
            None => false,
        }
    }
}

// =============================================================================
// CONTACT
// =============================================================================

/// Validate the public contact form: every field required, email well formed.
///
/// # Errors
///
/// Returns per-field errors; nothing is sent while any remain.
pub fn validate_contact(name: &str, email: &str, message: &str) -> Result<SubmitContact, ValidationErrors> {
    let (name, email, message) = (name.trim(), email.trim(), message.trim());
    let mut errors = ValidationErrors::default();
    if name.is_empty() {
        errors.push(Field::Name, FieldError::Required);
    }
    if email.is_empty() {
        errors.push(Field::Email, FieldError::Required);
    } else if !is_valid_email(email) {
        errors.push(Field::Email, FieldError::InvalidEmail);
    }
    if message.is_empty() {
        errors.push(Field::Message, FieldError::Required);
    }
    errors.into_result()?;
    Ok(SubmitContact { name: name.to_owned(), email: email.to_owned(), message: message.to_owned() })
}
