//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::session_gate::SessionGate;
use crate::pages::{dashboard::DashboardPage, home::HomePage, login::LoginPage, signup::SignupPage};
use crate::state::session::SessionState;
use crate::util::auth::GateConfig;
use crate::util::route_table::RouteTable;
use crate::util::token_store::TokenStore;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name="apple-mobile-web-app-capable" content="yes"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the token store, route table, gate configuration and session
/// snapshot, then wraps the router outlet in the session gate.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    provide_context(TokenStore::browser());
    provide_context(RouteTable::default());
    provide_context(GateConfig::default());
    provide_context(RwSignal::new(SessionState::default()));

    view! {
        <Stylesheet id="leptos" href="/pkg/answer24.css"/>
        <Title text="answer24"/>

        <Router>
            <SessionGate>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("signup") view=SignupPage/>
                    <Route path=StaticSegment("dashboard") view=DashboardPage/>
                    <Route path=StaticSegment("admin") view=DashboardPage/>
                    <Route path=StaticSegment("partner") view=DashboardPage/>
                </Routes>
            </SessionGate>
        </Router>
    }
}
