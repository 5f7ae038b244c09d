//! Sensor traits

use core::fmt::Debug;

/// Barometric pressure sensor
pub trait PressureSensor {
    /// Error type for sensor access
    type Error: Debug;

    /// Trigger a conversion and return the compensated pressure in hPa
    ///
    /// Takes `&mut self` because every call starts a new conversion on
    /// the device.
    fn read_hpa(&mut self) -> Result<f64, Self::Error>;
}

/// Source of the currently selected antenna
pub trait AntennaSource {
    /// Error type for selector access
    type Error: Debug;

    /// Read the selected antenna index
    fn antenna_index(&mut self) -> Result<i8, Self::Error>;
}
