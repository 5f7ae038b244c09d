//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in rigpanel-core for the devices on the panel's I2C bus:
//!
//! - Character LCD (ACM1602NI, 16x2, with half-width katakana)
//! - Barometric pressure sensor (MPL115A2)
//! - Antenna selector (single signed status byte)
//!
//! Drivers are written against the `rigpanel-hal` bus traits and
//! `embedded_hal::delay::DelayNs` for controller settle times. They are
//! strictly sequential: every public call completes its transactions and
//! delays before returning.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod display;
pub mod error;
pub mod sensor;

#[cfg(test)]
mod mock;

pub use display::Acm1602;
pub use error::{Error, ValidationError};
pub use sensor::{AntennaSelector, Mpl115a2};
