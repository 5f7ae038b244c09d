//! Configuration loading
//!
//! Reads a TOML file into [`PanelConfig`], or falls back to the built-in
//! defaults when no file is given.

pub mod loader;

pub use loader::{load_config, parse_config};
