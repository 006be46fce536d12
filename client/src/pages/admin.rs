//! Admin landing page. Only reachable through an admin-only route guard.

use leptos::prelude::*;
use session::shell::greeting;

use crate::state::auth::ClientSession;

#[component]
pub fn AdminPage() -> impl IntoView {
    let client = expect_context::<ClientSession>();
    let current = client.current;
    let email = move || current.with(|s| s.user().map(|u| u.email.clone()).unwrap_or_default());

    view! {
        <section class="admin">
            <h1>"Administration"</h1>
            <p>{move || greeting(&current.get()).unwrap_or_default()} " (" {email} ")"</p>
            <p class="admin__role">{move || current.with(|s| s.role().as_str())}</p>
        </section>
    }
}
