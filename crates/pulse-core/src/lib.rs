//! Pulse Core - Fundamental types for the frame loop
//!
//! This crate defines the types shared by the pulse crates:
//! - State keys (name-derived 32-bit identities)
//! - Error taxonomy and result alias

pub mod error;
pub mod key;

pub use error::*;
pub use key::*;
