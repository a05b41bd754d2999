//! Region selection, independent of any GUI toolkit.
//!
//! This module provides:
//! - Rectangle and point types (`SelectionRect`, `Point`, `CaptureRegion`)
//! - The press/move/release state machine (`SelectionMachine`)

pub mod rect;
pub mod state;

pub use rect::{CaptureRegion, Corner, Point, SelectionRect};
pub use state::{Hit, SelectionMachine, SelectionState};
