//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, display
//! mode) from page and component logic so the session rules stay testable
//! without a browser.

pub mod auth;
pub mod display_mode;
pub mod route_table;
pub mod storage;
pub mod token_store;
