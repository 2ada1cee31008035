//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (held-key map, bindings)
//! - The browser entry point and frame loop

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{KeyBindings, KeyState};
