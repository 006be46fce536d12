//! Layout chrome: navigation for guests or signed-in users, theme and
//! sidebar toggles, the session notice banner, and the logout action.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything here reads the `ClientSession` mirror, so a profile edit on
//! another page or a forced sign-out updates the header without a reload.

use leptos::prelude::*;
use leptos_router::components::A;
use session::shell::{greeting, nav_links};

use crate::state::auth::ClientSession;
use crate::util::dark_mode;

#[cfg(feature = "csr")]
const NOTICE_TTL: std::time::Duration = std::time::Duration::from_secs(8);

#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let client = expect_context::<ClientSession>();
    let current = client.current;
    let notice = client.navigator.notice;

    let theme = RwSignal::new(dark_mode::read_preference(&client.preferences));
    Effect::new(move || dark_mode::apply(theme.get()));

    let collapsed = RwSignal::new(client.preferences.sidebar_collapsed());

    let theme_prefs = client.preferences.clone();
    let on_toggle_theme = move |_| theme.update(|t| *t = dark_mode::toggle(&theme_prefs, *t));

    let sidebar_prefs = client.preferences.clone();
    let on_toggle_sidebar = move |_| {
        collapsed.update(|c| *c = !*c);
        sidebar_prefs.set_sidebar_collapsed(collapsed.get_untracked());
    };

    let logout_client = client.clone();
    let on_logout = move |_| logout_client.logout();

    Effect::new(move || {
        if notice.get().is_none() {
            return;
        }
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            gloo_timers::future::sleep(NOTICE_TTL).await;
            let _ = notice.try_set(None);
        });
    });

    let links = move || nav_links(&current.get());
    let signed_in = move || current.get().is_authenticated();
    let user_label = move || greeting(&current.get()).unwrap_or_default();
    let theme_label = move || match theme.get() {
        session::Theme::Light => "Dark mode",
        session::Theme::Dark => "Light mode",
    };

    view! {
        <div class="app-shell" class:app-shell--collapsed=move || collapsed.get()>
            <header class="app-header">
                <button class="app-header__menu" on:click=on_toggle_sidebar>"Menu"</button>
                <span class="app-header__brand">"Exam Prep"</span>
                <Show when=signed_in>
                    <span class="app-header__user">{user_label}</span>
                </Show>
                <button class="app-header__theme" on:click=on_toggle_theme>{theme_label}</button>
                <Show when=signed_in>
                    <button class="app-header__logout" on:click=on_logout.clone()>"Log out"</button>
                </Show>
            </header>
            <nav class="app-sidebar">
                <For each=links key=|link| link.screen let:link>
                    <A href=link.screen.path()>{link.label}</A>
                </For>
            </nav>
            <Show when=move || notice.get().is_some()>
                <div class="app-notice" role="alert">
                    <span>{move || notice.get().unwrap_or_default()}</span>
                    <button on:click=move |_| notice.set(None)>"Dismiss"</button>
                </div>
            </Show>
            <main class="app-main">{children()}</main>
        </div>
    }
}
