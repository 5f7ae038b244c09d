//! Panel configuration types

use alloc::string::String;
use core::fmt;
use core::time::Duration;

#[cfg(feature = "serde")]
use serde::Deserialize;

/// Default I2C character device
pub const DEFAULT_BUS_PATH: &str = "/dev/i2c-1";

/// Default ACM1602NI address
pub const DEFAULT_DISPLAY_ADDRESS: u8 = 0x50;

/// Default MPL115A2 address
pub const DEFAULT_SENSOR_ADDRESS: u8 = 0x60;

/// Default antenna selector address
pub const DEFAULT_ANTENNA_ADDRESS: u8 = 0x65;

/// Default status feed endpoint
pub const DEFAULT_FEED_URL: &str = "ws://localhost:51234";

/// Highest 7-bit I2C address
const MAX_ADDRESS: u8 = 0x7F;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Address does not fit in 7 bits
    InvalidAddress { device: &'static str, address: u8 },
    /// Two enabled devices share an address
    AddressConflict { address: u8 },
    /// Bus path is empty
    EmptyBusPath,
    /// Feed URL is empty
    EmptyFeedUrl,
    /// Poll interval of zero would spin
    ZeroPollInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidAddress { device, address } => {
                write!(f, "{} address 0x{:02x} is not a 7-bit address", device, address)
            }
            ConfigError::AddressConflict { address } => {
                write!(f, "more than one device configured at 0x{:02x}", address)
            }
            ConfigError::EmptyBusPath => write!(f, "bus path is empty"),
            ConfigError::EmptyFeedUrl => write!(f, "feed url is empty"),
            ConfigError::ZeroPollInterval => write!(f, "poll interval must be non-zero"),
        }
    }
}

/// I2C bus configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default, deny_unknown_fields))]
pub struct BusConfig {
    /// Character device node (e.g., "/dev/i2c-1")
    pub path: String,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            path: String::from(DEFAULT_BUS_PATH),
        }
    }
}

/// Character LCD configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default, deny_unknown_fields))]
pub struct DisplayConfig {
    /// 7-bit I2C address
    pub address: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_DISPLAY_ADDRESS,
        }
    }
}

/// Pressure sensor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default, deny_unknown_fields))]
pub struct SensorConfig {
    /// Sensor is fitted
    pub enabled: bool,
    /// 7-bit I2C address
    pub address: u8,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            address: DEFAULT_SENSOR_ADDRESS,
        }
    }
}

/// Antenna selector configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default, deny_unknown_fields))]
pub struct AntennaConfig {
    /// Selector is fitted
    pub enabled: bool,
    /// 7-bit I2C address
    pub address: u8,
}

impl Default for AntennaConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            address: DEFAULT_ANTENNA_ADDRESS,
        }
    }
}

/// Status feed configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default, deny_unknown_fields))]
pub struct FeedConfig {
    /// Websocket URL of the rig control process
    pub url: String,
    /// Method name sent in the status request
    pub method: String,
    /// Request id sent in the status request
    pub id: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: String::from(DEFAULT_FEED_URL),
            method: String::from(rigpanel_protocol::STATUS_METHOD),
            id: String::from("0"),
        }
    }
}

/// Poll loop timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default, deny_unknown_fields))]
pub struct PollConfig {
    /// Delay between ticks in milliseconds
    pub interval_ms: u32,
    /// Delay after a failed tick in milliseconds
    pub retry_ms: u32,
    /// Clear and rewrite the display every this many ticks (0 = never)
    ///
    /// Recovers from the module losing its contents (brown-out, hot
    /// plug) while the line cache still believes the rows are current.
    pub redraw_ticks: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            retry_ms: 1000,
            redraw_ticks: 300,
        }
    }
}

impl PollConfig {
    /// Delay between successful ticks
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms as u64)
    }

    /// Delay after a failed tick
    pub fn retry(&self) -> Duration {
        Duration::from_millis(self.retry_ms as u64)
    }

    /// True if tick number `tick` (counting from 1) should be a full redraw
    pub fn is_redraw_tick(&self, tick: u64) -> bool {
        self.redraw_ticks != 0 && tick % self.redraw_ticks as u64 == 0
    }
}

/// Complete panel configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default, deny_unknown_fields))]
pub struct PanelConfig {
    pub bus: BusConfig,
    pub display: DisplayConfig,
    pub sensor: SensorConfig,
    pub antenna: AntennaConfig,
    pub feed: FeedConfig,
    pub poll: PollConfig,
}

impl PanelConfig {
    /// Check addresses, paths and timing
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bus.path.trim().is_empty() {
            return Err(ConfigError::EmptyBusPath);
        }
        if self.feed.url.trim().is_empty() {
            return Err(ConfigError::EmptyFeedUrl);
        }
        if self.poll.interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }

        let devices = [
            ("display", true, self.display.address),
            ("sensor", self.sensor.enabled, self.sensor.address),
            ("antenna", self.antenna.enabled, self.antenna.address),
        ];

        for (i, &(device, enabled, address)) in devices.iter().enumerate() {
            if !enabled {
                continue;
            }
            if address > MAX_ADDRESS {
                return Err(ConfigError::InvalidAddress { device, address });
            }
            let clash = devices[i + 1..]
                .iter()
                .any(|&(_, other_enabled, other)| other_enabled && other == address);
            if clash {
                return Err(ConfigError::AddressConflict { address });
            }
        }

        Ok(())
    }
}
