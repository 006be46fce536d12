//! Profile page: view and edit the signed-in user's profile.
//!
//! A successful save goes through `Authenticator::save_profile`, which
//! refreshes the session user; the header greeting updates from that
//! notification without a reload.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;
use session::endpoints::{GetProfile, ProfileUpdate};

use crate::components::text_field::TextField;
use crate::state::auth::ClientSession;

/// `None` for blank input so the server leaves the field unchanged.
pub(crate) fn optional_field(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let client = expect_context::<ClientSession>();
    let name = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let bio = RwSignal::new(String::new());
    let status = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    #[cfg(feature = "csr")]
    {
        let gate = client.gate.clone();
        leptos::task::spawn_local(async move {
            let profile = gate.fetch(&GetProfile).await.profile;
            let _ = name.try_set(profile.name);
            let _ = phone.try_set(profile.phone.unwrap_or_default());
            let _ = bio.try_set(profile.bio.unwrap_or_default());
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let update = ProfileUpdate {
            name: optional_field(&name.get_untracked()),
            phone: optional_field(&phone.get_untracked()),
            bio: optional_field(&bio.get_untracked()),
            avatar_url: None,
        };
        saving.set(true);
        status.set(None);
        let auth = client.auth.clone();

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let outcome = match auth.save_profile(update).await {
                Ok(_) => "Profile saved.".to_owned(),
                Err(e) => e.to_string(),
            };
            let _ = status.try_set(Some(outcome));
            let _ = saving.try_set(false);
        });
        #[cfg(not(feature = "csr"))]
        let _ = (update, auth);
    };

    let no_error = Signal::derive(String::new);

    view! {
        <section class="profile">
            <h1>"Your profile"</h1>
            <form class="profile-form" on:submit=on_submit>
                <TextField
                    label="Name"
                    value=name.into()
                    on_input=Callback::new(move |v: String| name.set(v))
                    error=no_error
                />
                <TextField
                    label="Phone"
                    kind="tel"
                    value=phone.into()
                    on_input=Callback::new(move |v: String| phone.set(v))
                    error=no_error
                />
                <TextField
                    label="Bio"
                    value=bio.into()
                    on_input=Callback::new(move |v: String| bio.set(v))
                    error=no_error
                />
                <button type="submit" disabled=move || saving.get()>"Save"</button>
            </form>
            <Show when=move || status.get().is_some()>
                <p class="profile__status">{move || status.get().unwrap_or_default()}</p>
            </Show>
        </section>
    }
}
