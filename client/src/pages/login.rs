//! Login page: email + password against the auth service.

use leptos::prelude::*;
use leptos_router::components::A;
use session::Screen;
use session::forms::{Field, LoginForm};

use crate::components::text_field::TextField;
use crate::state::auth::ClientSession;
use crate::util::auth::{field_message, submit_label};

#[component]
pub fn LoginPage() -> impl IntoView {
    let client = expect_context::<ClientSession>();
    let form = RwSignal::new(LoginForm::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(credentials) = form.try_update(LoginForm::begin_submit).flatten() else {
            return;
        };
        let auth = client.auth.clone();

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let result = auth.login(&credentials).await;
            // `None` when the page was left while the request was in flight.
            let _ = form.try_update(|f| {
                auth.finish_login(f, result, |_| auth.gate().navigator().navigate(Screen::Home))
            });
        });
        #[cfg(not(feature = "csr"))]
        let _ = (credentials, auth);
    };

    let email = Signal::derive(move || form.with(|f| f.email().to_owned()));
    let password = Signal::derive(move || form.with(|f| f.password().to_owned()));
    let email_error = Signal::derive(move || form.with(|f| field_message(f.status(), Field::Email)));
    let password_error = Signal::derive(move || form.with(|f| field_message(f.status(), Field::Password)));
    let message = move || form.with(|f| f.status().message().map(str::to_owned));

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Sign in"</h1>
                <form class="auth-form" on:submit=on_submit novalidate=true>
                    <TextField
                        label="Email"
                        kind="email"
                        placeholder="you@example.com"
                        value=email
                        on_input=Callback::new(move |v: String| form.update(|f| f.set_email(v)))
                        error=email_error
                    />
                    <TextField
                        label="Password"
                        kind="password"
                        value=password
                        on_input=Callback::new(move |v: String| form.update(|f| f.set_password(v)))
                        error=password_error
                    />
                    <button
                        class="auth-button"
                        type="submit"
                        disabled=move || form.with(|f| f.status().is_submitting())
                    >
                        {move || form.with(|f| submit_label(f.status(), "Sign in"))}
                    </button>
                </form>
                <Show when=move || message().is_some()>
                    <p class="auth-message auth-message--error">{move || message().unwrap_or_default()}</p>
                </Show>
                <div class="auth-links">
                    <A href=Screen::ForgotPassword.path()>"Forgot your password?"</A>
                    <A href=Screen::Signup.path()>"Create an account"</A>
                </div>
            </div>
        </div>
    }
}
