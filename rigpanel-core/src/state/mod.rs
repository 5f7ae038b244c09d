//! Panel state
//!
//! The poll loop owns a single [`DisplayState`]; feed records and device
//! readings are merged into it and the renderer reads from it.

mod display_state;

pub use display_state::DisplayState;
