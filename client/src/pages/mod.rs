//! Page modules for route-level screens.
//!
//! Every page renders inside `SessionGate`, so a page mounted on a protected
//! route can assume a resolved, authenticated session.

pub mod dashboard;
pub mod home;
pub mod login;
pub mod signup;
