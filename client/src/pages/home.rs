//! Public landing page.

use leptos::prelude::*;

use crate::state::session::SessionState;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let signed_in = move || session.with(|s| s.is_authenticated);

    view! {
        <div class="home-page">
            <h1>"answer24"</h1>
            <p class="home-page__tagline">"Answers around the clock."</p>
            <Show
                when=signed_in
                fallback=|| view! {
                    <nav class="home-page__actions">
                        <a href="/login" class="home-link">"Sign in"</a>
                        <a href="/signup" class="home-link home-link--primary">"Get started"</a>
                    </nav>
                }
            >
                <a href="/dashboard" class="home-link home-link--primary">"Open dashboard"</a>
            </Show>
        </div>
    }
}
