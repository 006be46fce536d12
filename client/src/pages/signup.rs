//! Signup page: name, email, password with confirmation, terms acceptance.

use leptos::prelude::*;
use leptos_router::components::A;
use session::Screen;
use session::forms::{Field, SignupForm};

use crate::components::text_field::TextField;
use crate::state::auth::ClientSession;
use crate::util::auth::{field_message, submit_label};

#[component]
pub fn SignupPage() -> impl IntoView {
    let client = expect_context::<ClientSession>();
    let form = RwSignal::new(SignupForm::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(details) = form.try_update(SignupForm::begin_submit).flatten() else {
            return;
        };
        let auth = client.auth.clone();

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let result = auth.signup(&details).await;
            let _ = form.try_update(|f| {
                auth.finish_signup(f, result, |_| auth.gate().navigator().navigate(Screen::Home))
            });
        });
        #[cfg(not(feature = "csr"))]
        let _ = (details, auth);
    };

    let input = move |read: fn(&SignupForm) -> String| Signal::derive(move || form.with(read));
    let error = move |field: Field| Signal::derive(move || form.with(|f| field_message(f.status(), field)));
    let terms_error = error(Field::AcceptTerms);
    let message = move || form.with(|f| f.status().message().map(str::to_owned));

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Create your account"</h1>
                <form class="auth-form" on:submit=on_submit novalidate=true>
                    <TextField
                        label="Full name"
                        value=input(|f| f.input().name.clone())
                        on_input=Callback::new(move |v: String| form.update(|f| f.set_name(v)))
                        error=error(Field::Name)
                    />
                    <TextField
                        label="Email"
                        kind="email"
                        placeholder="you@example.com"
                        value=input(|f| f.input().email.clone())
                        on_input=Callback::new(move |v: String| form.update(|f| f.set_email(v)))
                        error=error(Field::Email)
                    />
                    <TextField
                        label="Password"
                        kind="password"
                        value=input(|f| f.input().password.clone())
                        on_input=Callback::new(move |v: String| form.update(|f| f.set_password(v)))
                        error=error(Field::Password)
                    />
                    <TextField
                        label="Confirm password"
                        kind="password"
                        value=input(|f| f.input().confirm_password.clone())
                        on_input=Callback::new(move |v: String| form.update(|f| f.set_confirm_password(v)))
                        error=error(Field::ConfirmPassword)
                    />
                    <label class="field field--checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|f| f.input().accept_terms)
                            on:change=move |ev| form.update(|f| f.set_accept_terms(event_target_checked(&ev)))
                        />
                        <span>"I accept the terms of service"</span>
                    </label>
                    <Show when=move || !terms_error.get().is_empty()>
                        <span class="field__error">{move || terms_error.get()}</span>
                    </Show>
                    <button
                        class="auth-button"
                        type="submit"
                        disabled=move || form.with(|f| f.status().is_submitting())
                    >
                        {move || form.with(|f| submit_label(f.status(), "Sign up"))}
                    </button>
                </form>
                <Show when=move || message().is_some()>
                    <p class="auth-message auth-message--error">{move || message().unwrap_or_default()}</p>
                </Show>
                <div class="auth-links">
                    <A href=Screen::Entry.path()>"Already have an account? Sign in"</A>
                </div>
            </div>
        </div>
    }
}
