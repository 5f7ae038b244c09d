//! I2C bus abstractions
//!
//! Every call is one complete transaction: the implementation acquires
//! the bus, binds the slave address, transfers, and releases the bus
//! again before returning, on success and on error alike. Nothing is
//! retried at this layer.

use core::fmt;

/// 7-bit I2C slave address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceAddress(u8);

/// Address outside the 7-bit range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidAddress(pub u8);

impl fmt::Display for InvalidAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I2C address 0x{:02x} is not a 7-bit address", self.0)
    }
}

impl DeviceAddress {
    /// Highest valid 7-bit address
    pub const MAX: u8 = 0x7F;

    /// Create an address, rejecting anything above 0x7F
    pub const fn new(address: u8) -> Result<Self, InvalidAddress> {
        if address > Self::MAX {
            Err(InvalidAddress(address))
        } else {
            Ok(Self(address))
        }
    }

    /// Create an address in a const context
    ///
    /// Panics (at compile time for `const` items) on an address above 0x7F.
    pub const fn from_u7(address: u8) -> Self {
        assert!(address <= Self::MAX, "I2C address must fit in 7 bits");
        Self(address)
    }

    /// Raw 7-bit value
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DeviceAddress {
    type Error = InvalidAddress;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x}", self.0)
    }
}

/// I2C bus master, write capability only
///
/// Devices that are never read from (the character LCD) are bounded on
/// this trait alone.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error: fmt::Debug;

    /// Write data to a device in a single transaction
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write, first byte is usually a register or control byte
    fn write(&mut self, address: DeviceAddress, data: &[u8]) -> Result<(), Self::Error>;
}

/// I2C bus master with register reads
pub trait I2cRead: I2cBus {
    /// Write `register` then read `buf.len()` bytes back
    ///
    /// Fails if the device returns fewer bytes than requested.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `register` - First register to read
    /// * `buf` - Buffer to read into
    fn read(
        &mut self,
        address: DeviceAddress,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), Self::Error>;
}
