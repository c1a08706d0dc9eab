//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls to the auth endpoints and `types` defines the
//! shared wire schema.

pub mod api;
pub mod types;
