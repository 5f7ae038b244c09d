//! TOML configuration loader

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::info;

use rigpanel_core::config::PanelConfig;

/// Parse a configuration document
///
/// Omitted tables and keys take their defaults; unknown keys are rejected.
pub fn parse_config(text: &str) -> Result<PanelConfig, toml::de::Error> {
    toml::from_str(text)
}

/// Load and validate the configuration
///
/// With no path the defaults are used.
pub fn load_config(path: Option<&Path>) -> Result<PanelConfig> {
    let config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let config =
                parse_config(&text).with_context(|| format!("parsing {}", path.display()))?;
            info!("Loaded configuration from {}", path.display());
            config
        }
        None => {
            info!("No configuration file given, using defaults");
            PanelConfig::default()
        }
    };

    config
        .validate()
        .map_err(|e| anyhow!("invalid configuration: {}", e))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use rigpanel_core::config::ConfigError;

    const SAMPLE_CONFIG: &str = include_str!("../../rigpanel.toml");

    #[test]
    fn test_sample_matches_defaults() {
        let config = parse_config(SAMPLE_CONFIG).unwrap();
        assert_eq!(config, PanelConfig::default());
    }

    #[test]
    fn test_empty_document() {
        let config = parse_config("").unwrap();
        assert_eq!(config, PanelConfig::default());
    }

    #[test]
    fn test_partial_table() {
        let config = parse_config(
            r#"
            [sensor]
            enabled = false

            [poll]
            interval_ms = 250
            "#,
        )
        .unwrap();

        assert!(!config.sensor.enabled);
        assert_eq!(config.sensor.address, 0x60);
        assert_eq!(config.poll.interval_ms, 250);
        assert_eq!(config.poll.retry_ms, 1000);
        assert!(config.antenna.enabled);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(parse_config("[display]\ncontrast = 3\n").is_err());
    }

    #[test]
    fn test_validation_applied() {
        let config = parse_config("[display]\naddress = 0x60\n").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigError::AddressConflict { address: 0x60 })
        );
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("rigpanel-{}.toml", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[feed]\nurl = \"ws://rig.local:51234\"").unwrap();
        drop(file);

        let config = load_config(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.feed.url, "ws://rig.local:51234");
        assert_eq!(config.feed.method, "status");
    }

    #[test]
    fn test_load_missing_file() {
        let path = Path::new("/nonexistent/rigpanel.toml");
        let err = load_config(Some(path)).unwrap_err();
        assert!(format!("{:#}", err).contains("reading /nonexistent/rigpanel.toml"));
    }

    #[test]
    fn test_load_defaults() {
        assert_eq!(load_config(None).unwrap(), PanelConfig::default());
    }
}
