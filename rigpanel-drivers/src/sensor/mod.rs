//! Sensor drivers

pub mod antenna;
pub mod mpl115a2;

pub use antenna::{AntennaSelector, ANTENNA_SELECTOR_ADDR};
pub use mpl115a2::{AdcSample, Coefficients, Measurement, Mpl115a2, MPL115A2_ADDR};
