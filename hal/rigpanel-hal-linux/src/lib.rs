//! Linux-specific HAL for the rigpanel status display
//!
//! This crate provides implementations of the shared `rigpanel-hal`
//! traits on top of the kernel's i2c-dev character devices:
//!
//! - [`LinuxI2cBus`] - per-transaction access to `/dev/i2c-N`
//! - [`Delay`] - blocking delays for controller settle times

pub mod i2c;

pub use i2c::{LinuxBusError, LinuxI2cBus, DEFAULT_BUS_PATH};
pub use linux_embedded_hal::Delay;

// Re-export shared traits from rigpanel-hal for convenience
pub use rigpanel_hal::{DeviceAddress, I2cBus, I2cRead};
