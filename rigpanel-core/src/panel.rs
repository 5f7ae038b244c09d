//! Panel controller
//!
//! The panel is the single owner of the display, the optional sensors and
//! the [`DisplayState`]. Each tick it:
//! - Reads the antenna selector and the pressure sensor
//! - Renders both rows
//! - Sends them to the display, which skips unchanged rows

use core::fmt;

use rigpanel_protocol::StatusRecord;

use crate::render::render_rows;
use crate::state::DisplayState;
use crate::traits::{AntennaSource, PressureSensor, TextDisplay};

/// Which step of a tick failed
///
/// The underlying device error has already been logged when this is
/// returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickError {
    /// Antenna selector read failed
    Antenna,
    /// Pressure conversion failed
    Pressure,
    /// Writing a row to the display failed
    Display { row: u8 },
}

impl fmt::Display for TickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickError::Antenna => write!(f, "antenna selector read failed"),
            TickError::Pressure => write!(f, "pressure read failed"),
            TickError::Display { row } => write!(f, "display write of row {} failed", row),
        }
    }
}

/// Panel state for coordinating the devices
pub struct Panel<D, P, A> {
    display: D,
    pressure: Option<P>,
    antenna: Option<A>,
    state: DisplayState,
}

impl<D, P, A> Panel<D, P, A>
where
    D: TextDisplay,
    P: PressureSensor,
    A: AntennaSource,
{
    /// Create a panel; absent sensors are simply not shown
    pub fn new(display: D, pressure: Option<P>, antenna: Option<A>) -> Self {
        Self {
            display,
            pressure,
            antenna,
            state: DisplayState::new(),
        }
    }

    /// Get current state
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Get the display
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Merge a record received from the status feed
    pub fn apply_status(&mut self, record: StatusRecord) {
        log::debug!("status update: {:?}", record);
        self.state.merge(record);
    }

    /// Read the devices and refresh the display
    ///
    /// Every step is attempted even if an earlier one fails, so a dead
    /// sensor does not freeze the status row. Returns the first failure.
    pub fn tick(&mut self) -> Result<(), TickError> {
        let mut first_error = None;

        if let Some(antenna) = self.antenna.as_mut() {
            match antenna.antenna_index() {
                Ok(index) => self.state.set_antenna_index(Some(index)),
                Err(e) => {
                    log::warn!("antenna selector read failed: {:?}", e);
                    self.state.set_antenna_index(None);
                    first_error.get_or_insert(TickError::Antenna);
                }
            }
        }

        if let Some(pressure) = self.pressure.as_mut() {
            match pressure.read_hpa() {
                Ok(hpa) => self.state.set_pressure(Some(hpa)),
                Err(e) => {
                    log::warn!("pressure read failed: {:?}", e);
                    self.state.set_pressure(None);
                    first_error.get_or_insert(TickError::Pressure);
                }
            }
        }

        let rows = render_rows(&self.state);
        for (row, text) in (0u8..).zip(rows.iter()) {
            if row >= self.display.rows() {
                break;
            }
            if let Err(e) = self.display.put_line(row, text, false) {
                log::warn!("display write of row {} failed: {:?}", row, e);
                first_error.get_or_insert(TickError::Display { row });
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Clear the display and rewrite every row
    pub fn redraw(&mut self) -> Result<(), D::Error> {
        self.display.clear()?;
        let rows = render_rows(&self.state);
        for (row, text) in (0u8..).zip(rows.iter()) {
            if row >= self.display.rows() {
                break;
            }
            self.display.put_line(row, text, true)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec::Vec;
    use rigpanel_protocol::FieldValue;

    #[derive(Default)]
    struct MockDisplay {
        lines: [String; 2],
        writes: Vec<(u8, String, bool)>,
        clears: usize,
        fail: bool,
    }

    impl TextDisplay for MockDisplay {
        type Error = ();

        fn rows(&self) -> u8 {
            2
        }

        fn columns(&self) -> u8 {
            16
        }

        fn clear(&mut self) -> Result<(), ()> {
            self.clears += 1;
            self.lines = Default::default();
            Ok(())
        }

        fn put_line(&mut self, row: u8, text: &str, force: bool) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.writes.push((row, String::from(text), force));
            self.lines[row as usize] = String::from(text);
            Ok(())
        }
    }

    struct MockPressure(Result<f64, ()>);

    impl PressureSensor for MockPressure {
        type Error = ();

        fn read_hpa(&mut self) -> Result<f64, ()> {
            self.0
        }
    }

    struct MockAntenna(Result<i8, ()>);

    impl AntennaSource for MockAntenna {
        type Error = ();

        fn antenna_index(&mut self) -> Result<i8, ()> {
            self.0
        }
    }

    type TestPanel = Panel<MockDisplay, MockPressure, MockAntenna>;

    #[test]
    fn test_tick_renders_both_rows() {
        let mut panel: TestPanel = Panel::new(
            MockDisplay::default(),
            Some(MockPressure(Ok(1013.2))),
            Some(MockAntenna(Ok(1))),
        );
        panel.apply_status(StatusRecord {
            mode: Some(FieldValue::Text(String::from("FM"))),
            power: Some(FieldValue::Integer(5)),
            frequency: Some(FieldValue::Integer(144)),
            antenna: None,
        });

        assert_eq!(panel.tick(), Ok(()));
        let display = panel.display();
        assert_eq!(display.lines[0], "ANT:1    1013hPa");
        assert_eq!(display.lines[1], " FM  5W 144");
        assert!(display.writes.iter().all(|(_, _, force)| !force));
    }

    #[test]
    fn test_tick_without_sensors() {
        let mut panel: TestPanel = Panel::new(MockDisplay::default(), None, None);
        assert_eq!(panel.tick(), Ok(()));
        assert_eq!(panel.display().lines[0], "ANT:-");
        assert!(panel.state().pressure_hpa.is_none());
    }

    #[test]
    fn test_antenna_failure_still_updates_display() {
        let mut panel: TestPanel = Panel::new(
            MockDisplay::default(),
            Some(MockPressure(Ok(1000.0))),
            Some(MockAntenna(Err(()))),
        );

        assert_eq!(panel.tick(), Err(TickError::Antenna));
        assert!(panel.state().antenna_index.is_none());
        assert_eq!(panel.display().lines[0], "ANT:-    1000hPa");
    }

    #[test]
    fn test_first_error_reported() {
        let mut panel: TestPanel = Panel::new(
            MockDisplay::default(),
            Some(MockPressure(Err(()))),
            Some(MockAntenna(Err(()))),
        );
        assert_eq!(panel.tick(), Err(TickError::Antenna));
    }

    #[test]
    fn test_display_failure() {
        let display = MockDisplay {
            fail: true,
            ..Default::default()
        };
        let mut panel: TestPanel = Panel::new(display, None, Some(MockAntenna(Ok(0))));
        assert_eq!(panel.tick(), Err(TickError::Display { row: 0 }));
        // Sensor reading is still recorded
        assert_eq!(panel.state().antenna_index, Some(0));
    }

    #[test]
    fn test_redraw_forces_rows() {
        let mut panel: TestPanel = Panel::new(MockDisplay::default(), None, None);
        panel.redraw().unwrap();

        let display = panel.display();
        assert_eq!(display.clears, 1);
        assert_eq!(display.writes.len(), 2);
        assert!(display.writes.iter().all(|(_, _, force)| *force));
    }
}
