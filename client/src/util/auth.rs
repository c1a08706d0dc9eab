//! Session gate: route-change auth decisions and redirect scheduling.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route renders behind one gate. On each path change it reads the
//! token store, classifies the path and either renders, redirects to the
//! auth-entry route, or redirects a signed-in user away from auth screens.
//!
//! DESIGN
//! ======
//! - `resolve` is pure and synchronous: store + table + config + path + host
//!   context in, decision out. Storage problems surface as "no session".
//! - `RedirectScheduler` owns the one-navigation-per-cycle rule. Each path
//!   change opens a new cycle, and teardown cancels, so a delayed redirect
//!   armed for an older cycle can never fire. It also owns the pending
//!   timer, which is dropped (and so cleared) with its cycle.
//! - `install_session_gate` wires both into Leptos: a memo recomputes the
//!   decision when the path or the store changes, an effect performs
//!   `replace` navigations, cleanup unsubscribes and cancels.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::any::Any;
use std::fmt;
use std::time::Duration;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::net::types::User;
use crate::state::session::{GatePhase, SessionState};
use crate::util::display_mode::HostContext;
use crate::util::route_table::{RouteKind, RouteTable, normalize_path};
use crate::util::token_store::TokenStore;

pub const DEFAULT_AUTH_ENTRY_ROUTE: &str = "/login";
pub const DEFAULT_LANDING_ROUTE: &str = "/dashboard";

/// Lets the installed-app splash animation finish before navigating.
pub const STANDALONE_REDIRECT_DELAY_MS: u64 = 2500;

// =============================================================================
// CONFIG
// =============================================================================

/// Redirect targets and timing for the gate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateConfig {
    pub auth_entry_route: String,
    pub landing_route: String,
    /// `(role, landing route)` pairs checked before `landing_route`.
    pub role_landing: Vec<(String, String)>,
    pub standalone_delay: Duration,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            auth_entry_route: DEFAULT_AUTH_ENTRY_ROUTE.to_owned(),
            landing_route: DEFAULT_LANDING_ROUTE.to_owned(),
            role_landing: vec![
                ("admin".to_owned(), "/admin".to_owned()),
                ("partner".to_owned(), "/partner".to_owned()),
            ],
            standalone_delay: Duration::from_millis(STANDALONE_REDIRECT_DELAY_MS),
        }
    }
}

impl GateConfig {
    /// Landing route for a signed-in user.
    #[must_use]
    pub fn landing_for(&self, user: Option<&User>) -> &str {
        let role = user.and_then(User::role).map(str::trim);
        role.and_then(|role| {
            self.role_landing
                .iter()
                .find(|(r, _)| r.eq_ignore_ascii_case(role))
                .map(|(_, route)| route.as_str())
        })
        .unwrap_or(&self.landing_route)
    }

    /// Delay before a redirect fires. Zero in a browser tab.
    #[must_use]
    pub fn redirect_delay(&self, host: HostContext) -> Duration {
        if host.is_standalone() { self.standalone_delay } else { Duration::ZERO }
    }
}

// =============================================================================
// DECISION
// =============================================================================

/// What the gate does for the current path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateAction {
    /// Still initializing; show the placeholder.
    Wait,
    /// Render the route's children.
    Render,
    /// Show the placeholder and `replace`-navigate to `to` after `delay`.
    Redirect { to: String, delay: Duration },
}

/// Full result of one resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct GateDecision {
    /// Normalized path this decision belongs to.
    pub path: String,
    pub route: RouteKind,
    pub session: SessionState,
    pub action: GateAction,
}

impl GateDecision {
    /// Decision before the client has mounted: nothing is rendered yet.
    #[must_use]
    pub fn initializing(table: &RouteTable, path: &str) -> Self {
        Self {
            path: normalize_path(path),
            route: table.classify(path),
            session: SessionState::default(),
            action: GateAction::Wait,
        }
    }

    #[must_use]
    pub fn renders_children(&self) -> bool {
        self.action == GateAction::Render
    }
}

/// Resolve the gate for `path` from the current store contents.
#[must_use]
pub fn resolve(
    store: &TokenStore,
    table: &RouteTable,
    config: &GateConfig,
    path: &str,
    host: HostContext,
) -> GateDecision {
    let route = table.classify(path);
    let session = SessionState::resolved(store.session());

    let action = match (session.is_authenticated, route) {
        (true, RouteKind::AuthEntry) => GateAction::Redirect {
            to: config.landing_for(session.user.as_ref()).to_owned(),
            delay: config.redirect_delay(host),
        },
        (false, RouteKind::Protected) => GateAction::Redirect {
            to: config.auth_entry_route.clone(),
            delay: config.redirect_delay(host),
        },
        _ => GateAction::Render,
    };

    let path = normalize_path(path);
    log::debug!("session gate: {path} {route:?} authenticated={} -> {action:?}", session.is_authenticated);
    GateDecision { path, route, session, action }
}

// =============================================================================
// REDIRECT SCHEDULER
// =============================================================================

/// Proof that a redirect was armed in a particular cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RedirectTicket {
    cycle: u64,
}

#[derive(Debug, Default, PartialEq, Eq)]
enum Slot {
    #[default]
    Idle,
    Pending(String),
    Done,
}

/// Allows at most one navigation per resolution cycle.
///
/// A delayed redirect can hand its timer to the scheduler; the handle is
/// dropped when the cycle ends, so teardown and path changes cancel it.
/// A fired timer is kept until the next cycle because it may still be
/// executing.
#[derive(Default)]
pub struct RedirectScheduler {
    cycle: u64,
    slot: Slot,
    timer: Option<Box<dyn Any>>,
}

impl fmt::Debug for RedirectScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedirectScheduler")
            .field("cycle", &self.cycle)
            .field("slot", &self.slot)
            .field("has_timer", &self.timer.is_some())
            .finish()
    }
}

impl RedirectScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new resolution cycle, invalidating outstanding tickets and
    /// dropping any attached timer.
    pub fn begin_cycle(&mut self) -> u64 {
        self.cycle += 1;
        self.slot = Slot::Idle;
        self.timer = None;
        self.cycle
    }

    /// Arm a redirect for the current cycle. `None` if one was already armed.
    pub fn schedule(&mut self, to: &str) -> Option<RedirectTicket> {
        if self.slot != Slot::Idle {
            return None;
        }
        self.slot = Slot::Pending(to.to_owned());
        Some(RedirectTicket { cycle: self.cycle })
    }

    /// Keep `timer` alive for as long as `ticket`'s redirect is pending.
    /// Returns `false` (dropping `timer` immediately) if the ticket is stale.
    pub fn attach_timer(&mut self, ticket: RedirectTicket, timer: impl Any) -> bool {
        if ticket.cycle != self.cycle || !self.is_pending() {
            return false;
        }
        self.timer = Some(Box::new(timer));
        true
    }

    /// Claim the navigation target if `ticket` is still current.
    pub fn fire(&mut self, ticket: RedirectTicket) -> Option<String> {
        if ticket.cycle != self.cycle {
            return None;
        }
        match std::mem::replace(&mut self.slot, Slot::Done) {
            Slot::Pending(to) => Some(to),
            other => {
                self.slot = other;
                None
            }
        }
    }

    /// Drop any pending redirect and its timer (teardown).
    pub fn cancel(&mut self) {
        self.begin_cycle();
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.slot, Slot::Pending(_))
    }
}

/// Open a new cycle for `decision` and arm its redirect, if it has one.
fn begin_decision(scheduler: &mut RedirectScheduler, decision: &GateDecision) -> Option<(RedirectTicket, Duration)> {
    scheduler.begin_cycle();
    match &decision.action {
        GateAction::Redirect { to, delay } => scheduler.schedule(to).map(|ticket| (ticket, *delay)),
        GateAction::Wait | GateAction::Render => None,
    }
}

fn navigate_replace<F>(navigate: &F, target: Option<String>)
where
    F: Fn(&str, NavigateOptions),
{
    if let Some(to) = target {
        navigate(&to, NavigateOptions { replace: true, ..NavigateOptions::default() });
    }
}

// =============================================================================
// LEPTOS WIRING
// =============================================================================

type SharedScheduler = StoredValue<RedirectScheduler, leptos::reactive::owner::LocalStorage>;

/// Inputs the gate reads from context.
#[derive(Clone)]
pub struct GateContext {
    pub store: TokenStore,
    pub table: RouteTable,
    pub config: GateConfig,
}

/// Install the gate for the current owner and return its decision memo.
///
/// `path` is the reactive current pathname; `navigate` must perform the
/// router navigation. `session` receives each resolved state.
pub fn install_session_gate<F>(
    gate: GateContext,
    path: Memo<String>,
    session: RwSignal<SessionState>,
    navigate: F,
) -> Memo<GateDecision>
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let GateContext { store, table, config } = gate;
    let host = crate::util::display_mode::detect();

    // Effects only run in the browser after hydration, so SSR and the
    // hydration pass both stay in `Wait` and agree with each other.
    let mounted = RwSignal::new(false);
    Effect::new(move || mounted.set(true));

    let version = RwSignal::new(0_u64);
    let subscription = store.subscribe(move |_| version.update(|v| *v += 1));

    let decision = Memo::new({
        let store = store.clone();
        move |_| {
            version.track();
            let path = path.get();
            if mounted.get() {
                resolve(&store, &table, &config, &path, host)
            } else {
                GateDecision::initializing(&table, &path)
            }
        }
    });

    let scheduler: SharedScheduler = StoredValue::new_local(RedirectScheduler::new());

    Effect::new(move || {
        let current = decision.get();
        if current.session.phase() != GatePhase::Initializing {
            session.set(current.session.clone());
        }

        let armed = scheduler
            .try_update_value(|sched| begin_decision(sched, &current))
            .flatten();
        if let Some((ticket, delay)) = armed {
            schedule_navigation(scheduler, ticket, delay, navigate.clone());
        }
    });

    on_cleanup(move || {
        store.unsubscribe(subscription);
        scheduler.try_update_value(RedirectScheduler::cancel);
    });

    decision
}

fn schedule_navigation<F>(scheduler: SharedScheduler, ticket: RedirectTicket, delay: Duration, navigate: F)
where
    F: Fn(&str, NavigateOptions) + 'static,
{
    let fire = move || {
        let target = scheduler.try_update_value(|sched| sched.fire(ticket)).flatten();
        navigate_replace(&navigate, target);
    };

    #[cfg(feature = "hydrate")]
    {
        if !delay.is_zero() {
            let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
            let timer = gloo_timers::callback::Timeout::new(millis, fire);
            if scheduler.try_update_value(|sched| sched.attach_timer(ticket, timer)) != Some(true) {
                log::debug!("session gate: redirect superseded before its timer was armed");
            }
            return;
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = delay;
    }

    fire();
}
