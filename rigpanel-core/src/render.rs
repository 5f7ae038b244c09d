//! Row rendering for the 16x2 panel
//!
//! ```text
//! ┌────────────────┐
//! │ANT:1    1013hPa│  antenna selector + pressure
//! │ FM  5W 144     │  mode, power, frequency from the feed
//! └────────────────┘
//! ```
//!
//! Rows are rendered as plain strings; padding and truncation to the
//! display width is the display driver's job.

use alloc::format;
use alloc::string::String;
use core::fmt;

use rigpanel_protocol::FieldValue;

use crate::state::DisplayState;

/// Number of rows rendered
pub const PANEL_ROWS: usize = 2;

/// Width of the antenna label on row 0 when pressure is shown
const ANTENNA_LABEL_WIDTH: usize = 8;

/// Renders an optional field as an empty string when unknown
struct OrBlank<'a>(Option<&'a FieldValue>);

impl fmt::Display for OrBlank<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => fmt::Display::fmt(value, f),
            None => f.pad(""),
        }
    }
}

/// Row 0: selected antenna and barometric pressure
///
/// The selector index wins over the feed's antenna name; `-` is shown
/// when neither is known.
pub fn antenna_row(state: &DisplayState) -> String {
    let label = match (state.antenna_index, state.antenna_name.as_ref()) {
        (Some(index), _) => format!("ANT:{}", index),
        (None, Some(name)) => format!("ANT:{}", name),
        (None, None) => String::from("ANT:-"),
    };

    match state.pressure_hpa {
        Some(hpa) => format!(
            "{:<width$.width$}{:>5.0}hPa",
            label,
            hpa,
            width = ANTENNA_LABEL_WIDTH
        ),
        None => label,
    }
}

/// Row 1: mode, power and frequency
///
/// Blank until the feed has delivered at least one field.
pub fn status_row(state: &DisplayState) -> String {
    if !state.has_status() {
        return String::new();
    }

    let frequency = match state.frequency.as_ref() {
        Some(value) => format!("{}", value.integer()),
        None => String::new(),
    };

    format!(
        "{:>3} {:>2}W {}",
        OrBlank(state.mode.as_ref()),
        OrBlank(state.power.as_ref()),
        frequency
    )
}

/// Render every row of the panel, top to bottom
pub fn render_rows(state: &DisplayState) -> [String; PANEL_ROWS] {
    [antenna_row(state), status_row(state)]
}
