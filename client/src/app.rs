//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::hooks::use_navigate;
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::app_shell::AppShell;
use crate::components::route_guard::{EntryGuard, RouteGuard};
use crate::pages::{
    admin::AdminPage, contact::ContactPage, dashboard::DashboardPage, forgot_password::ForgotPasswordPage,
    login::LoginPage, profile::ProfilePage, signup::SignupPage,
};
use crate::state::auth::ClientSession;
use crate::util::auth::install_navigation_bridge;

/// Performs navigation requested by the gate and shell controller.
#[component]
fn NavigationBridge() -> impl IntoView {
    let client = expect_context::<ClientSession>();
    install_navigation_bridge(client.navigator.pending, use_navigate());
}

/// Root application component.
///
/// Rehydrates the session once and provides it to every route.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(ClientSession::browser());

    view! {
        <Title text="Exam Prep"/>

        <Router>
            <NavigationBridge/>
            <AppShell>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=|| view! { <Redirect path="/dashboard"/> }/>
                    <Route
                        path=StaticSegment("login")
                        view=|| view! { <EntryGuard><LoginPage/></EntryGuard> }
                    />
                    <Route
                        path=StaticSegment("signup")
                        view=|| view! { <EntryGuard><SignupPage/></EntryGuard> }
                    />
                    <Route path=StaticSegment("forgot-password") view=ForgotPasswordPage/>
                    <Route path=StaticSegment("contact") view=ContactPage/>
                    <Route
                        path=StaticSegment("dashboard")
                        view=|| view! { <RouteGuard><DashboardPage/></RouteGuard> }
                    />
                    <Route
                        path=StaticSegment("profile")
                        view=|| view! { <RouteGuard><ProfilePage/></RouteGuard> }
                    />
                    <Route
                        path=StaticSegment("admin")
                        view=|| view! { <RouteGuard require_admin=true><AdminPage/></RouteGuard> }
                    />
                </Routes>
            </AppShell>
        </Router>
    }
}
