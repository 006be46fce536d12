use super::*;

fn valid_signup() -> SignupInput {
    SignupInput {
        name: "Asha".to_owned(),
        email: "asha@example.com".to_owned(),
        password: "Secret123".to_owned(),
        confirm_password: "Secret123".to_owned(),
        accept_terms: true,
    }
}

// =============================================================
// Login
// =============================================================

#[test]
fn empty_login_yields_two_field_errors() {
    let mut form = LoginForm::new();
    assert!(form.begin_submit().is_none());

    let errors = form.status().errors();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.get(Field::Email), &[FieldError::Required]);
    assert_eq!(errors.get(Field::Password), &[FieldError::Required]);
    assert_eq!(form.status().phase(), FormPhase::Editing);
}

#[test]
fn editing_a_field_clears_only_its_error() {
    let mut form = LoginForm::new();
    form.begin_submit();

    form.set_email("a@b.io");
    assert!(form.status().errors().get(Field::Email).is_empty());
    assert_eq!(form.status().errors().get(Field::Password), &[FieldError::Required]);
}

#[test]
fn valid_login_enters_submitting_with_trimmed_email() {
    let mut form = LoginForm::new();
    form.set_email("  admin@gmail.com ");
    form.set_password("admin123");

    let creds = form.begin_submit().unwrap();
    assert_eq!(creds.email, "admin@gmail.com");
    assert_eq!(creds.password, "admin123");
    assert!(form.status().is_submitting());
}

#[test]
fn second_submit_while_submitting_is_ignored() {
    let mut form = LoginForm::new();
    form.set_email("a@b.io");
    form.set_password("pw");
    assert!(form.begin_submit().is_some());
    assert!(form.begin_submit().is_none());
    assert!(form.status().is_submitting());
}

#[test]
fn failed_submission_surfaces_message_and_is_editable_again() {
    let mut form = LoginForm::new();
    form.set_email("a@b.io");
    form.set_password("pw");
    form.begin_submit();

    assert_eq!(form.finish::<(), _>(Err("Invalid credentials")), None);
    assert_eq!(form.status().phase(), FormPhase::Failed);
    assert_eq!(form.status().message(), Some("Invalid credentials"));

    form.set_password("pw2");
    assert_eq!(form.status().phase(), FormPhase::Editing);
    assert!(form.begin_submit().is_some());
    assert_eq!(form.status().message(), None);
}

#[test]
fn successful_submission_reaches_success() {
    let mut form = LoginForm::new();
    form.set_email("a@b.io");
    form.set_password("pw");
    form.begin_submit();
    assert_eq!(form.finish::<_, String>(Ok(7)), Some(7));
    assert_eq!(form.status().phase(), FormPhase::Success);
}

#[test]
fn login_credentials_debug_hides_password() {
    let creds = validate_login("a@b.io", "hunter2").unwrap();
    assert!(!format!("{creds:?}").contains("hunter2"));
}

// =============================================================
// Signup
// =============================================================

#[test]
fn valid_signup_passes() {
    let details = validate_signup(&valid_signup()).unwrap();
    assert_eq!(details.name, "Asha");
    assert_eq!(details.email, "asha@example.com");
}

#[test]
fn short_password_reports_each_requirement() {
    let input = SignupInput { password: "abc".to_owned(), confirm_password: "abc".to_owned(), ..valid_signup() };
    let errors = validate_signup(&input).unwrap_err();
    assert_eq!(
        errors.get(Field::Password),
        &[FieldError::TooShort { min: 8 }, FieldError::MissingUppercase, FieldError::MissingDigit]
    );
    assert_eq!(errors.len(), 1);
}

#[test]
fn long_password_without_digit_reports_only_digit() {
    assert_eq!(password_requirements("Abcdefghij"), vec![FieldError::MissingDigit]);
    assert!(password_requirements("Abcdefg1").is_empty());
}

#[test]
fn signup_checks_name_email_confirmation_and_terms() {
    let input = SignupInput {
        name: " A ".to_owned(),
        email: "not-an-email".to_owned(),
        password: "Secret123".to_owned(),
        confirm_password: "Secret124".to_owned(),
        accept_terms: false,
    };
    let errors = validate_signup(&input).unwrap_err();
    assert_eq!(errors.get(Field::Name), &[FieldError::TooShort { min: 2 }]);
    assert_eq!(errors.get(Field::Email), &[FieldError::InvalidEmail]);
    assert_eq!(errors.get(Field::ConfirmPassword), &[FieldError::Mismatch]);
    assert_eq!(errors.get(Field::AcceptTerms), &[FieldError::TermsNotAccepted]);
    assert!(errors.get(Field::Password).is_empty());
}

#[test]
fn empty_signup_marks_every_field() {
    let mut form = SignupForm::new();
    assert!(form.begin_submit().is_none());
    assert_eq!(form.status().errors().len(), 5);
    assert_eq!(form.status().errors().first(Field::Name).as_deref(), Some("This field is required"));
}

#[test]
fn signup_form_flow_clears_terms_error_on_toggle() {
    let mut form = SignupForm::new();
    form.set_name("Asha");
    form.set_email("asha@example.com");
    form.set_password("Secret123");
    form.set_confirm_password("Secret123");
    assert!(form.begin_submit().is_none());
    assert_eq!(form.status().errors().get(Field::AcceptTerms), &[FieldError::TermsNotAccepted]);

    form.set_accept_terms(true);
    assert!(form.status().errors().is_empty());
    assert!(form.begin_submit().is_some());
}

#[test]
fn email_pattern_is_basic() {
    assert!(is_valid_email("a@b.co"));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("a b@c.io"));
    assert!(!is_valid_email("@c.io"));
}

#[test]
fn field_error_messages_are_readable() {
    assert_eq!(FieldError::TooShort { min: 8 }.to_string(), "Must be at least 8 characters");
    assert_eq!(FieldError::MissingDigit.to_string(), "Must contain a number");
}

// =============================================================
// Forgot password
// =============================================================

#[test]
fn reset_form_requires_valid_email() {
    let mut form = ResetForm::new();
    form.set_email("nope");
    assert!(form.begin_submit().is_none());
    assert_eq!(form.status().errors().get(Field::Email), &[FieldError::InvalidEmail]);

    form.set_email(" a@b.io ");
    assert_eq!(form.begin_submit().as_deref(), Some("a@b.io"));
}

#[test]
fn reset_form_shows_confirmation_as_message() {
    let mut form = ResetForm::new();
    form.set_email("a@b.io");
    form.begin_submit();
    assert!(form.finish::<String>(Ok("Check your inbox".to_owned())));
    assert_eq!(form.status().message(), Some("Check your inbox"));
    assert_eq!(form.status().phase(), FormPhase::Success);
}

#[test]
fn iter_lists_errors_in_field_order() {
    let input = SignupInput { name: "A".to_owned(), password: "abc".to_owned(), ..SignupInput::default() };
    let errors = validate_signup(&input).unwrap_err();
    let fields: Vec<_> = errors.iter().map(|(field, _)| field.label()).collect();
    assert_eq!(fields.first(), Some(&"name"));
    assert!(fields.contains(&"terms"));
    assert_eq!(errors.iter().filter(|(field, _)| *field == Field::Password).count(), 3);
}

#[test]
fn failed_form_stays_editable_and_resubmits() {
    let mut form = LoginForm::new();
    form.set_email("a@b.io");
    form.set_password("pw");
    form.begin_submit().unwrap();
    assert_eq!(form.finish::<(), _>(Err("Invalid email or password")), None);
    assert_eq!(form.status().phase(), FormPhase::Failed);
    assert!(!form.status().is_submitting());

    let again = form.begin_submit().unwrap();
    assert_eq!(again.email, "a@b.io");
    assert_eq!(form.status().message(), None);

    form.finish::<(), _>(Err("still wrong"));
    form.set_password("pw2");
    assert_eq!(form.status().phase(), FormPhase::Editing);
    assert_eq!(form.status().message(), Some("still wrong"));
}

#[test]
fn contact_requires_every_field() {
    let errors = validate_contact("", "", "  ").unwrap_err();
    assert_eq!(errors.get(Field::Name), &[FieldError::Required]);
    assert_eq!(errors.get(Field::Email), &[FieldError::Required]);
    assert_eq!(errors.get(Field::Message), &[FieldError::Required]);
}

#[test]
fn contact_email_must_look_valid() {
    let errors = validate_contact("Ana", "nope", "hi").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get(Field::Email), &[FieldError::InvalidEmail]);
}

#[test]
fn contact_submission_is_trimmed() {
    let submission = validate_contact(" Ana ", " a@b.io ", " hello ").unwrap();
    assert_eq!(submission.name, "Ana");
    assert_eq!(submission.email, "a@b.io");
    assert_eq!(submission.message, "hello");
}
