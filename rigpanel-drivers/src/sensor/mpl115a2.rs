//! MPL115A2 barometric pressure sensor
//!
//! The sensor stores four factory calibration coefficients as signed
//! fixed-point words. They are read once at construction; every
//! measurement then triggers a conversion, waits for it, and compensates
//! the raw 10-bit pressure and temperature samples:
//!
//! ```text
//! Pcomp = a0 + (b1 + c12 * Tadc) * Padc + b2 * Tadc
//! hPa   = Pcomp * (1150 - 500) / 1023 + 500
//! ```

use embedded_hal::delay::DelayNs;
use rigpanel_core::traits::PressureSensor;
use rigpanel_hal::{DeviceAddress, I2cRead};

use crate::error::Error;

/// MPL115A2 I2C address
pub const MPL115A2_ADDR: DeviceAddress = DeviceAddress::from_u7(0x60);

/// MPL115A2 register addresses
pub mod reg {
    /// Pressure ADC MSB, followed by pressure LSB and temperature MSB/LSB
    pub const PADC_MSB: u8 = 0x00;
    /// a0 MSB, first of the 8 coefficient bytes
    pub const A0_MSB: u8 = 0x04;
    /// Start pressure and temperature conversion
    pub const CONVERT: u8 = 0x12;
}

/// Conversion time, no completion flag is polled
const CONVERSION_TIME_US: u32 = 3000;

/// Output range of the compensated pressure in hPa
const PRESSURE_MIN_HPA: f64 = 500.0;
const PRESSURE_MAX_HPA: f64 = 1150.0;

/// Full scale of the 10-bit compensated pressure
const PCOMP_FULL_SCALE: f64 = 1023.0;

/// Decode a signed fixed-point word with `int_bits` integer bits
///
/// Bit 15 is the sign; the remaining `15 - int_bits` bits below the
/// integer part are fractional.
pub fn fixed_point(word: u16, int_bits: u8) -> f64 {
    let denominator = (1u32 << (15 - int_bits)) as f64;
    if word & 0x8000 == 0 {
        word as f64 / denominator
    } else {
        -((((!word) as u32) + 1) as f64 / denominator)
    }
}

/// Decoded calibration coefficients
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub a0: f64,
    pub b1: f64,
    pub b2: f64,
    pub c12: f64,
}

impl Coefficients {
    /// Decode the 8 coefficient bytes starting at `A0_MSB`
    pub fn from_bytes(raw: &[u8; 8]) -> Self {
        let word = |i: usize| u16::from_be_bytes([raw[i], raw[i + 1]]);
        Self {
            a0: fixed_point(word(0), 12),
            b1: fixed_point(word(2), 2),
            b2: fixed_point(word(4), 1),
            c12: fixed_point(word(6), 0) / 512.0,
        }
    }

    /// Temperature-compensated pressure, 0-1023 over 50-115 kPa
    pub fn compensate(&self, sample: AdcSample) -> f64 {
        let p_adc = sample.pressure as f64;
        let t_adc = sample.temperature as f64;
        self.a0 + (self.b1 + self.c12 * t_adc) * p_adc + self.b2 * t_adc
    }

    /// Compensated pressure in hPa
    pub fn pressure_hpa(&self, sample: AdcSample) -> f64 {
        self.compensate(sample) * ((PRESSURE_MAX_HPA - PRESSURE_MIN_HPA) / PCOMP_FULL_SCALE)
            + PRESSURE_MIN_HPA
    }
}

/// Raw 10-bit ADC readings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcSample {
    pub pressure: u16,
    pub temperature: u16,
}

impl AdcSample {
    /// Decode the 4 data bytes starting at `PADC_MSB`
    ///
    /// Each value is left-aligned in a big-endian word.
    pub fn from_bytes(raw: &[u8; 4]) -> Self {
        Self {
            pressure: u16::from_be_bytes([raw[0], raw[1]]) >> 6,
            temperature: u16::from_be_bytes([raw[2], raw[3]]) >> 6,
        }
    }
}

/// Result of one conversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub sample: AdcSample,
    pub hpa: f64,
}

/// MPL115A2 driver
pub struct Mpl115a2<B, D> {
    bus: B,
    delay: D,
    address: DeviceAddress,
    coefficients: Coefficients,
}

impl<B, D> Mpl115a2<B, D>
where
    B: I2cRead,
    D: DelayNs,
{
    /// Read calibration from the sensor at the default address
    pub fn new(bus: B, delay: D) -> Result<Self, Error<B::Error>> {
        Self::with_address(bus, delay, MPL115A2_ADDR)
    }

    /// Read calibration from the sensor at `address`
    pub fn with_address(
        mut bus: B,
        delay: D,
        address: DeviceAddress,
    ) -> Result<Self, Error<B::Error>> {
        let mut raw = [0u8; 8];
        bus.read(address, reg::A0_MSB, &mut raw).map_err(Error::Io)?;
        let coefficients = Coefficients::from_bytes(&raw);

        log::info!(
            "MPL115A2 at {}: a0={} b1={} b2={} c12={}",
            address,
            coefficients.a0,
            coefficients.b1,
            coefficients.b2,
            coefficients.c12
        );

        Ok(Self {
            bus,
            delay,
            address,
            coefficients,
        })
    }

    /// Calibration decoded at construction
    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    /// Run a conversion and return the raw sample with the pressure
    pub fn measure_sample(&mut self) -> Result<Measurement, Error<B::Error>> {
        self.bus
            .write(self.address, &[reg::CONVERT, 0x01])
            .map_err(Error::Io)?;
        self.delay.delay_us(CONVERSION_TIME_US);

        let mut raw = [0u8; 4];
        self.bus
            .read(self.address, reg::PADC_MSB, &mut raw)
            .map_err(Error::Io)?;

        let sample = AdcSample::from_bytes(&raw);
        let hpa = self.coefficients.pressure_hpa(sample);
        log::debug!(
            "MPL115A2 Padc={} Tadc={} -> {} hPa",
            sample.pressure,
            sample.temperature,
            hpa
        );
        Ok(Measurement { sample, hpa })
    }

    /// Run a conversion and return the pressure in hPa
    pub fn measure(&mut self) -> Result<f64, Error<B::Error>> {
        self.measure_sample().map(|m| m.hpa)
    }

    /// Destroy the driver and return the bus and delay
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }
}

impl<B, D> PressureSensor for Mpl115a2<B, D>
where
    B: I2cRead,
    D: DelayNs,
{
    type Error = Error<B::Error>;

    fn read_hpa(&mut self) -> Result<f64, Self::Error> {
        self.measure()
    }
}
