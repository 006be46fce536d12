//! Dashboard page: the signed-in landing screen.
//!
//! SYSTEM CONTEXT
//! ==============
//! Loads the notification summary as a background call. If the session dies
//! while the request is in flight the gate returns an empty feed and the
//! route guard takes the user to the entry screen.

use leptos::prelude::*;
use session::endpoints::{ListNotifications, MarkAllNotificationsRead, NotificationFeed};
use session::shell::greeting;

use crate::state::auth::ClientSession;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let client = expect_context::<ClientSession>();
    let current = client.current;
    let feed = RwSignal::new(NotificationFeed::default());
    let loading = RwSignal::new(true);

    #[cfg(feature = "csr")]
    {
        let gate = client.gate.clone();
        leptos::task::spawn_local(async move {
            let loaded = gate.fetch(&ListNotifications).await;
            let _ = feed.try_set(loaded);
            let _ = loading.try_set(false);
        });
    }

    let mark_gate = client.gate.clone();
    let on_mark_all = move |_| {
        let gate = mark_gate.clone();
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            gate.fetch(&MarkAllNotificationsRead).await;
            let refreshed = gate.fetch(&ListNotifications).await;
            let _ = feed.try_set(refreshed);
        });
        #[cfg(not(feature = "csr"))]
        let _ = gate;
    };

    let name = move || greeting(&current.get()).unwrap_or_default();
    let unread = move || feed.with(|f| f.unread);

    view! {
        <section class="dashboard">
            <h1>"Welcome back, " {name}</h1>
            <div class="dashboard__summary">
                <Show
                    when=move || !loading.get()
                    fallback=|| view! { <p>"Loading notifications..."</p> }
                >
                    <p>{move || format!("{} unread notifications", unread())}</p>
                    {
                        let on_mark_all = on_mark_all.clone();
                        view! {
                            <Show when=move || { unread() > 0 }>
                                <button on:click=on_mark_all.clone()>"Mark all as read"</button>
                            </Show>
                        }
                    }
                </Show>
            </div>
        </section>
    }
}
