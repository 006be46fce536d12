//! Public contact page. Works signed in or out; the endpoint is on the
//! public allow-list so no credential is attached.

use leptos::prelude::*;
use session::forms::{Field, ValidationErrors, validate_contact};

use crate::components::text_field::TextField;
use crate::state::auth::ClientSession;

#[component]
pub fn ContactPage() -> impl IntoView {
    let client = expect_context::<ClientSession>();
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let body = RwSignal::new(String::new());
    let status = RwSignal::new(None::<String>);
    let errors = RwSignal::new(ValidationErrors::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let submission = match validate_contact(&name.get_untracked(), &email.get_untracked(), &body.get_untracked()) {
            Ok(submission) => submission,
            Err(invalid) => {
                errors.set(invalid);
                return;
            }
        };
        errors.set(ValidationErrors::default());
        status.set(None);
        let gate = client.gate.clone();

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let outcome = match gate.send(&submission).await {
                Ok(reply) if !reply.message.is_empty() => reply.message,
                Ok(_) => "Thanks, we will be in touch.".to_owned(),
                Err(e) => e.to_string(),
            };
            let _ = status.try_set(Some(outcome));
        });
        #[cfg(not(feature = "csr"))]
        let _ = (submission, gate);
    };

    let error = move |field: Field| {
        Signal::derive(move || errors.with(|e| e.first(field).unwrap_or_default()))
    };

    view! {
        <section class="contact">
            <h1>"Contact us"</h1>
            <form class="contact-form" on:submit=on_submit novalidate=true>
                <TextField
                    label="Name"
                    value=name.into()
                    on_input=Callback::new(move |v: String| {
                        name.set(v);
                        errors.update(|e| e.clear_field(Field::Name));
                    })
                    error=error(Field::Name)
                />
                <TextField
                    label="Email"
                    kind="email"
                    value=email.into()
                    on_input=Callback::new(move |v: String| {
                        email.set(v);
                        errors.update(|e| e.clear_field(Field::Email));
                    })
                    error=error(Field::Email)
                />
                <TextField
                    label="Message"
                    value=body.into()
                    on_input=Callback::new(move |v: String| {
                        body.set(v);
                        errors.update(|e| e.clear_field(Field::Message));
                    })
                    error=error(Field::Message)
                />
                <button type="submit">"Send"</button>
            </form>
            <Show when=move || status.get().is_some()>
                <p class="contact__status">{move || status.get().unwrap_or_default()}</p>
            </Show>
        </section>
    }
}
