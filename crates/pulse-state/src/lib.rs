//! Pulse State - Frame-loop state registry
//!
//! This crate implements the active-state dispatch protocol:
//! - The `State` capability trait consumed by the registry
//! - The `StateRegistry` that routes per-frame update/render calls and
//!   shares one event stream across the active set

pub mod registry;
pub mod state;

pub use registry::*;
pub use state::*;
