//! Forgot-password page: requests a reset link for an email address.

use leptos::prelude::*;
use leptos_router::components::A;
use session::Screen;
use session::forms::{Field, FormPhase, ResetForm};

use crate::components::text_field::TextField;
use crate::state::auth::ClientSession;
use crate::util::auth::{field_message, submit_label};

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let client = expect_context::<ClientSession>();
    let form = RwSignal::new(ResetForm::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(email) = form.try_update(ResetForm::begin_submit).flatten() else {
            return;
        };
        let auth = client.auth.clone();

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let result = auth.request_password_reset(&email).await;
            let _ = form.try_update(|f| auth.finish_password_reset(f, result));
        });
        #[cfg(not(feature = "csr"))]
        let _ = (email, auth);
    };

    let email = Signal::derive(move || form.with(|f| f.email().to_owned()));
    let email_error = Signal::derive(move || form.with(|f| field_message(f.status(), Field::Email)));
    let succeeded = move || form.with(|f| f.status().phase() == FormPhase::Success);
    let message = move || form.with(|f| f.status().message().map(str::to_owned));

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Reset your password"</h1>
                <form class="auth-form" on:submit=on_submit novalidate=true>
                    <TextField
                        label="Email"
                        kind="email"
                        placeholder="you@example.com"
                        value=email
                        on_input=Callback::new(move |v: String| form.update(|f| f.set_email(v)))
                        error=email_error
                    />
                    <button
                        class="auth-button"
                        type="submit"
                        disabled=move || form.with(|f| f.status().is_submitting())
                    >
                        {move || form.with(|f| submit_label(f.status(), "Send reset link"))}
                    </button>
                </form>
                <Show when=move || message().is_some()>
                    <p class="auth-message" class:auth-message--error=move || !succeeded()>
                        {move || message().unwrap_or_default()}
                    </p>
                </Show>
                <div class="auth-links">
                    <A href=Screen::Entry.path()>"Back to sign in"</A>
                </div>
            </div>
        </div>
    }
}
