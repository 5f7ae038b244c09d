//! Board-agnostic core logic for the rig status panel
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (text display, pressure sensor, antenna selector)
//! - Configuration type definitions
//! - Display state merged from the status feed
//! - Row rendering for the 16x2 panel
//! - The per-tick panel update

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod config;
pub mod panel;
pub mod render;
pub mod state;
pub mod traits;
