//! rigpanel Hardware Abstraction Layer
//!
//! This crate defines the bus traits the device drivers are written
//! against. A platform crate implements them for a real bus; tests
//! implement them with recording mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  rigpanel-drivers (ACM1602, MPL115A2)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  rigpanel-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ rigpanel-hal- │
//!             │     linux     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - write-only I2C transactions
//! - [`i2c::I2cRead`] - register reads on top of [`i2c::I2cBus`]

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

// Re-export key traits at crate root for convenience
pub use i2c::{DeviceAddress, I2cBus, I2cRead, InvalidAddress};
