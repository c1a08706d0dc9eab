//! Signed-in landing page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered only once the session gate has resolved an authenticated
//! session. On mount it refreshes the cached profile from the backend; a
//! rejected token ends the session, which the gate turns into a redirect to
//! the auth entry route.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::net::api::AuthApiError;
use crate::net::types::User;
use crate::state::session::SessionState;
use crate::util::token_store::TokenStore;

/// What to do with the result of a profile refresh.
#[derive(Clone, Debug, PartialEq)]
enum ProfileRefresh {
    Replace(User),
    SignOut,
    Keep,
}

fn profile_refresh(result: Result<User, AuthApiError>) -> ProfileRefresh {
    match result {
        Ok(user) => ProfileRefresh::Replace(user),
        Err(AuthApiError::Unauthorized) => ProfileRefresh::SignOut,
        Err(_) => ProfileRefresh::Keep,
    }
}

#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
fn apply_profile_refresh(store: &TokenStore, result: Result<User, AuthApiError>) {
    if let Err(e) = &result {
        log::warn!("profile refresh failed: {e}");
    }
    match profile_refresh(result) {
        ProfileRefresh::Replace(user) => store.set_user(&user),
        ProfileRefresh::SignOut => store.remove_token(),
        ProfileRefresh::Keep => {}
    }
}

fn greeting(user: Option<&User>) -> String {
    match user {
        Some(user) => format!("Welcome back, {}", user.display_name()),
        None => "Welcome back".to_owned(),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let store = expect_context::<TokenStore>();
    let session = expect_context::<RwSignal<SessionState>>();

    #[cfg(feature = "hydrate")]
    {
        if let Some(token) = store.get_token() {
            let store = store.clone();
            leptos::task::spawn_local(async move {
                let result = crate::net::api::fetch_profile(&token).await;
                apply_profile_refresh(&store, result);
            });
        }
    }

    let signing_out = RwSignal::new(false);
    let on_logout = move |_| {
        if signing_out.get() {
            return;
        }
        signing_out.set(true);
        let token = store.get_token();
        let store = store.clone();
        leptos::task::spawn_local(async move {
            if let Some(token) = token {
                crate::net::api::logout(&token).await;
            }
            store.remove_token();
        });
    };

    let role = move || {
        session
            .get()
            .user
            .and_then(|u| u.role().map(str::to_owned))
            .unwrap_or_default()
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-header">
                <h1>{move || session.with(|s| greeting(s.user.as_ref()))}</h1>
                <Show when=move || !role().is_empty()>
                    <span class="dashboard-role">{role}</span>
                </Show>
                <button class="dashboard-logout" on:click=on_logout disabled=move || signing_out.get()>
                    "Log out"
                </button>
            </header>
            <section class="dashboard-body">
                <p>{move || session.with(|s| s.user.as_ref().and_then(|u| u.email().map(str::to_owned)).unwrap_or_default())}</p>
            </section>
        </div>
    }
}
