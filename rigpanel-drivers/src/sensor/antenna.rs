//! Antenna selector
//!
//! A small microcontroller on the bus that reports the currently selected
//! antenna as one signed byte at register 0x00.

use rigpanel_core::traits::AntennaSource;
use rigpanel_hal::{DeviceAddress, I2cRead};

use crate::error::Error;

/// Antenna selector I2C address
pub const ANTENNA_SELECTOR_ADDR: DeviceAddress = DeviceAddress::from_u7(0x65);

/// Register holding the selected antenna index
const REG_INDEX: u8 = 0x00;

/// Antenna selector driver
pub struct AntennaSelector<B> {
    bus: B,
    address: DeviceAddress,
}

impl<B: I2cRead> AntennaSelector<B> {
    /// Create a selector at the default address
    pub fn new(bus: B) -> Self {
        Self::with_address(bus, ANTENNA_SELECTOR_ADDR)
    }

    /// Create a selector at `address`
    pub fn with_address(bus: B, address: DeviceAddress) -> Self {
        Self { bus, address }
    }

    /// Read the selected antenna index
    pub fn read_index(&mut self) -> Result<i8, Error<B::Error>> {
        let mut buf = [0u8; 1];
        self.bus
            .read(self.address, REG_INDEX, &mut buf)
            .map_err(Error::Io)?;
        Ok(buf[0] as i8)
    }
}

impl<B: I2cRead> AntennaSource for AntennaSelector<B> {
    type Error = Error<B::Error>;

    fn antenna_index(&mut self) -> Result<i8, Self::Error> {
        self.read_index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBus;

    #[test]
    fn test_read_index() {
        let bus = MockBus::new().with_register(0x65, 0x00, &[0x02]);
        let mut selector = AntennaSelector::new(bus);
        assert_eq!(selector.read_index(), Ok(2));
    }

    #[test]
    fn test_read_negative_index() {
        let bus = MockBus::new().with_register(0x65, 0x00, &[0xFF]);
        let mut selector = AntennaSelector::new(bus);
        assert_eq!(selector.antenna_index(), Ok(-1));
    }

    #[test]
    fn test_read_failure() {
        // Nothing answers at this address
        let bus = MockBus::new().with_register(0x65, 0x00, &[0x01]);
        let mut selector = AntennaSelector::with_address(bus, DeviceAddress::from_u7(0x66));
        assert!(matches!(selector.read_index(), Err(Error::Io(_))));
    }
}
