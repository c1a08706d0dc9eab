//! Route-level auth gate wrapping the router outlet.

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::state::session::SessionState;
use crate::util::auth::{GateConfig, GateContext, install_session_gate};
use crate::util::route_table::RouteTable;
use crate::util::token_store::TokenStore;

/// Renders `children` only when the gate allows the current path. While
/// initializing or redirecting it renders a neutral placeholder.
///
/// Must sit inside `<Router>`. Reads `TokenStore`, `RouteTable`, `GateConfig`
/// and `RwSignal<SessionState>` from context.
#[component]
pub fn SessionGate(children: ChildrenFn) -> impl IntoView {
    let gate = GateContext {
        store: expect_context::<TokenStore>(),
        table: expect_context::<RouteTable>(),
        config: expect_context::<GateConfig>(),
    };
    let session = expect_context::<RwSignal<SessionState>>();
    let location = use_location();
    let navigate = use_navigate();

    let decision = install_session_gate(gate, location.pathname, session, navigate);

    view! {
        <Show
            when=move || decision.with(|d| d.renders_children())
            fallback=|| view! { <div class="session-gate__placeholder" aria-busy="true"></div> }
        >
            {children()}
        </Show>
    }
}
