//! Declarative wrapper that renders a protected subtree or redirects.
//!
//! The decision is a `Memo` over the session mirror, so a logout or expiry
//! while the route is mounted unmounts the children and redirects at once.

use leptos::prelude::*;
use leptos_router::components::Redirect;
use session::GuardDecision;

use crate::state::auth::ClientSession;
use crate::util::auth::redirect_path;

#[component]
pub fn RouteGuard(#[prop(optional)] require_admin: bool, children: ChildrenFn) -> impl IntoView {
    let client = expect_context::<ClientSession>();
    let current = client.current;
    let decision = Memo::new(move |_| GuardDecision::decide(&current.get(), require_admin));

    let fallback = move || redirect_path(decision.get()).map(|path| view! { <Redirect path=path/> });

    view! {
        <Show when=move || decision.get().renders() fallback=fallback>
            {children()}
        </Show>
    }
}

/// Wrapper for the public entry screens: signed-in visitors are sent to the
/// screen their role lands on instead of seeing the form again.
#[component]
pub fn EntryGuard(children: ChildrenFn) -> impl IntoView {
    let client = expect_context::<ClientSession>();
    let current = client.current;
    let decision = GuardDecision::for_public_entry(&current.get_untracked());

    let fallback = move || redirect_path(decision).map(|path| view! { <Redirect path=path/> });

    view! {
        <Show when=move || decision.renders() fallback=fallback>
            {children()}
        </Show>
    }
}
