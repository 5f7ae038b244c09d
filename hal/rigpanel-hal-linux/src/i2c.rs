//! I2C bus driver for Linux i2c-dev
//!
//! The character device is opened for every transaction and closed again
//! when the handle drops, so no transaction can leave the bus bound to a
//! stale slave address. Selecting the slave (`I2C_SLAVE`) is done by
//! `linux-embedded-hal` before each transfer.

use std::path::{Path, PathBuf};

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};
use linux_embedded_hal::I2cdev;
use rigpanel_hal::{DeviceAddress, I2cBus, I2cRead};

/// Bus used by the Raspberry Pi header pins
pub const DEFAULT_BUS_PATH: &str = "/dev/i2c-1";

/// Error from I2C operations
#[derive(Debug, thiserror::Error)]
pub enum LinuxBusError {
    /// The character device could not be opened
    #[error("cannot open I2C bus {path}: {reason}")]
    Open { path: String, reason: String },

    /// Address bind or transfer failed
    #[error("I2C transfer to 0x{address:02x} failed: {kind:?}")]
    Transfer { address: u8, kind: ErrorKind },
}

impl LinuxBusError {
    fn transfer(address: DeviceAddress, err: impl embedded_hal::i2c::Error) -> Self {
        LinuxBusError::Transfer {
            address: address.get(),
            kind: err.kind(),
        }
    }
}

/// I2C master backed by a Linux i2c-dev node
///
/// Holds only the device path. Cloning is cheap, so every driver sharing
/// the physical bus gets its own copy; callers still serialize access.
#[derive(Debug, Clone)]
pub struct LinuxI2cBus {
    path: PathBuf,
}

impl Default for LinuxI2cBus {
    fn default() -> Self {
        Self::new(DEFAULT_BUS_PATH)
    }
}

impl LinuxI2cBus {
    /// Create a bus for the given device node (e.g. `/dev/i2c-1`)
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Device node this bus opens
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the device for one transaction
    fn open(&self) -> Result<I2cdev, LinuxBusError> {
        I2cdev::new(&self.path).map_err(|e| LinuxBusError::Open {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

impl I2cBus for LinuxI2cBus {
    type Error = LinuxBusError;

    fn write(&mut self, address: DeviceAddress, data: &[u8]) -> Result<(), Self::Error> {
        let mut dev = self.open()?;
        log::trace!("i2c write {} {:02x?}", address, data);
        dev.write(address.get(), data)
            .map_err(|e| LinuxBusError::transfer(address, e))
    }
}

impl I2cRead for LinuxI2cBus {
    fn read(
        &mut self,
        address: DeviceAddress,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        let mut dev = self.open()?;
        dev.write_read(address.get(), &[register], buf)
            .map_err(|e| LinuxBusError::transfer(address, e))?;
        log::trace!("i2c read {} @{:02x} {:02x?}", address, register, buf);
        Ok(())
    }
}
