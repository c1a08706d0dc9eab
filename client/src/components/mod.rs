//! Reusable UI component modules.

pub mod session_gate;
