//! Error types for the pulse crates

use thiserror::Error;

use crate::StateKey;

/// Errors surfaced by the event stream and the state registry
///
/// An activate/deactivate call naming an unknown state is deliberately
/// not represented here: lookup misses are a benign no-op.
#[derive(Error, Debug)]
pub enum PulseError {
    // Event stream errors
    #[error("event stream full: record needs {needed} bytes, {available} available")]
    CapacityExceeded { needed: usize, available: usize },

    #[error("payload too large for a record header: {0} bytes")]
    PayloadTooLarge(usize),

    #[error("event index out of range: {index} >= {len}")]
    IndexOutOfRange { index: u32, len: u32 },

    #[error("buffer too short: expected {expected}, got {actual}")]
    BufferTooShort { expected: usize, actual: usize },

    // Registry errors
    #[error("state key already registered: {0}")]
    DuplicateState(StateKey),
}

/// Result type for pulse operations
pub type PulseResult<T> = Result<T, PulseError>;
