//! rigpanel - rig status panel daemon
//!
//! Drives an ACM1602NI 16x2 LCD on the Linux I2C bus:
//! - Row 0 shows the selected antenna and the barometric pressure
//! - Row 1 shows mode, power and frequency from the rig status feed
//!
//! Usage: `rigpanel [CONFIG.toml]`. Log level comes from `RUST_LOG`
//! (default `info`).

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{anyhow, bail, Result};
use log::{info, warn};

use rigpanel_core::config::PanelConfig;
use rigpanel_core::panel::Panel;
use rigpanel_drivers::{Acm1602, AntennaSelector, Mpl115a2};
use rigpanel_hal_linux::{Delay, DeviceAddress, LinuxI2cBus};

mod channels;
mod config;
mod feed;

use crate::channels::{feed_channel, wait_until};
use crate::config::load_config;

type LinuxPanel = Panel<
    Acm1602<LinuxI2cBus, Delay>,
    Mpl115a2<LinuxI2cBus, Delay>,
    AntennaSelector<LinuxI2cBus>,
>;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("rigpanel {} starting", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;

    let mut panel = build_panel(&config)?;

    let (tx, rx) = feed_channel();
    feed::spawn(config.feed.clone(), tx)?;

    let mut ticks: u64 = 0;
    loop {
        ticks += 1;

        let result = if config.poll.is_redraw_tick(ticks) {
            info!("Periodic redraw");
            panel
                .redraw()
                .map_err(|e| anyhow!("redraw failed: {}", e))
        } else {
            panel.tick().map_err(|e| anyhow!("{}", e))
        };

        let delay = match result {
            Ok(()) => config.poll.interval(),
            Err(e) => {
                warn!("tick {} failed: {}, retrying", ticks, e);
                config.poll.retry()
            }
        };

        if let Err(reason) = wait_until(&rx, Instant::now() + delay, |record| {
            panel.apply_status(record)
        }) {
            bail!("status feed closed: {}", reason);
        }
    }
}

/// Open the devices named in the configuration
///
/// The display is required. A pressure sensor whose calibration read fails
/// is left out with a warning.
fn build_panel(config: &PanelConfig) -> Result<LinuxPanel> {
    let bus = LinuxI2cBus::new(&config.bus.path);
    info!("Using I2C bus {}", bus.path().display());

    let display_address = device_address(config.display.address)?;
    let display = Acm1602::with_address(bus.clone(), Delay, display_address)
        .map_err(|e| anyhow!("display at {} init failed: {}", display_address, e))?;
    info!("Display ready at {}", display_address);

    let pressure = if config.sensor.enabled {
        let address = device_address(config.sensor.address)?;
        match Mpl115a2::with_address(bus.clone(), Delay, address) {
            Ok(sensor) => {
                info!("Pressure sensor ready at {}", address);
                Some(sensor)
            }
            Err(e) => {
                warn!("pressure sensor at {} unavailable: {}", address, e);
                None
            }
        }
    } else {
        None
    };

    let antenna = if config.antenna.enabled {
        let address = device_address(config.antenna.address)?;
        info!("Antenna selector at {}", address);
        Some(AntennaSelector::with_address(bus, address))
    } else {
        None
    };

    Ok(Panel::new(display, pressure, antenna))
}

fn device_address(raw: u8) -> Result<DeviceAddress> {
    DeviceAddress::new(raw).map_err(|e| anyhow!("{}", e))
}
