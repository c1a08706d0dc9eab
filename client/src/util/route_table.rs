//! Static route classification for the session gate.
//!
//! DESIGN
//! ======
//! One ordered table shared by every guard. Classification is a pure function
//! of the path: auth-entry rules are checked first, then public rules, and
//! anything unmatched is protected (fail closed). Auth state never changes
//! the classification, only the action the gate takes.
//!
//! Matching is segment-aware (`/blog` matches `/blog/x` but not `/blogger`),
//! ignores query strings, fragments and trailing slashes, and trims table
//! entries so a stray `"/signup "` still matches `/signup`.

#[cfg(test)]
#[path = "route_table_test.rs"]
mod route_table_test;

/// Screens that establish a new session.
pub const AUTH_ENTRY_ROUTES: &[&str] =
    &["/login", "/signup", "/register", "/forgot-password", "/reset-password", "/verify-email"];

/// Marketing and legal pages reachable regardless of auth state.
pub const PUBLIC_ROUTES: &[&str] =
    &["/about", "/contact", "/pricing", "/faq", "/blog", "/legal", "/unauthorized"];

/// Classification of a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RouteKind {
    Public,
    AuthEntry,
    Protected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MatchMode {
    Exact,
    Prefix,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct RouteRule {
    path: String,
    kind: RouteKind,
    mode: MatchMode,
}

impl RouteRule {
    fn matches(&self, path: &str) -> bool {
        match self.mode {
            MatchMode::Exact => path == self.path,
            MatchMode::Prefix => {
                path == self.path
                    || (path.starts_with(&self.path) && path[self.path.len()..].starts_with('/'))
            }
        }
    }
}

/// Ordered path table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl RouteTable {
    /// Empty table: every path is protected.
    #[must_use]
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    #[must_use]
    pub fn with_auth_entry(self, prefix: &str) -> Self {
        self.with_rule(prefix, RouteKind::AuthEntry, MatchMode::Prefix)
    }

    #[must_use]
    pub fn with_public(self, prefix: &str) -> Self {
        self.with_rule(prefix, RouteKind::Public, MatchMode::Prefix)
    }

    /// Public for exactly this path (used for `/`).
    #[must_use]
    pub fn with_public_exact(self, path: &str) -> Self {
        self.with_rule(path, RouteKind::Public, MatchMode::Exact)
    }

    fn with_rule(mut self, path: &str, kind: RouteKind, mode: MatchMode) -> Self {
        self.rules.push(RouteRule { path: normalize_path(path), kind, mode });
        self
    }

    /// Classify `path`. Unknown paths are protected.
    #[must_use]
    pub fn classify(&self, path: &str) -> RouteKind {
        let path = normalize_path(path);
        let hit = |kind: RouteKind| self.rules.iter().any(|r| r.kind == kind && r.matches(&path));
        if hit(RouteKind::AuthEntry) {
            RouteKind::AuthEntry
        } else if hit(RouteKind::Public) {
            RouteKind::Public
        } else {
            RouteKind::Protected
        }
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        let table = AUTH_ENTRY_ROUTES
            .iter()
            .fold(Self::empty(), |table, route| table.with_auth_entry(route));
        PUBLIC_ROUTES
            .iter()
            .fold(table.with_public_exact("/"), |table, route| table.with_public(route))
    }
}

/// Canonical form used for matching: trimmed, no query or fragment, leading
/// slash, no trailing slash (except the root itself).
#[must_use]
pub fn normalize_path(raw: &str) -> String {
    let trimmed = raw.trim();
    let end = trimmed.find(['?', '#']).unwrap_or(trimmed.len());
    let path = trimmed[..end].trim().trim_end_matches('/');
    if path.is_empty() {
        "/".to_owned()
    } else if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    }
}
