//! Pulse Wire - Binary event stream for the frame loop
//!
//! This crate implements the per-frame event encoding:
//! - Fixed record header (12 bytes)
//! - Bounds-checked byte arena with append-only records
//!
//! The layout is an in-process, within-frame artifact. The stream is
//! reset at the start of every tick and never crosses a process or
//! version boundary.

pub mod header;
pub mod stream;

pub use header::*;
pub use stream::*;
