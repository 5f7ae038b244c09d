//! Hardware abstraction traits
//!
//! These traits define the interface between the panel logic
//! and the device drivers.

pub mod display;
pub mod sensor;

pub use display::TextDisplay;
pub use sensor::{AntennaSource, PressureSensor};
