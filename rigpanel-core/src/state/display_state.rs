//! State shown on the panel

use rigpanel_protocol::{FieldValue, StatusRecord};

/// Everything the panel knows about the rig
///
/// Feed fields merge last-write-wins: a record only overwrites the fields
/// it carries. Device readings are replaced on every tick and become
/// unknown when a read fails.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayState {
    /// Operating mode (e.g., "FM")
    pub mode: Option<FieldValue>,
    /// Transmit power in watts
    pub power: Option<FieldValue>,
    /// Operating frequency
    pub frequency: Option<FieldValue>,
    /// Antenna name reported by the feed
    pub antenna_name: Option<FieldValue>,
    /// Antenna index read from the selector device
    pub antenna_index: Option<i8>,
    /// Last pressure reading in hPa
    pub pressure_hpa: Option<f64>,
}

impl DisplayState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a feed record, keeping fields the record does not carry
    pub fn merge(&mut self, record: StatusRecord) {
        let StatusRecord {
            mode,
            power,
            frequency,
            antenna,
        } = record;

        if mode.is_some() {
            self.mode = mode;
        }
        if power.is_some() {
            self.power = power;
        }
        if frequency.is_some() {
            self.frequency = frequency;
        }
        if antenna.is_some() {
            self.antenna_name = antenna;
        }
    }

    /// Record the latest antenna selector reading
    pub fn set_antenna_index(&mut self, index: Option<i8>) {
        self.antenna_index = index;
    }

    /// Record the latest pressure reading
    pub fn set_pressure(&mut self, hpa: Option<f64>) {
        self.pressure_hpa = hpa;
    }

    /// True once any feed field has been received
    pub fn has_status(&self) -> bool {
        self.mode.is_some()
            || self.power.is_some()
            || self.frequency.is_some()
            || self.antenna_name.is_some()
    }
}
