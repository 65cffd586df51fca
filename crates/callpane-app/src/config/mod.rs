//! Configuration file parsing for Callpane
//!
//! Supports `.callpane/config.toml` in the working directory. Command-line
//! flags override what the file says.

pub mod settings;
pub mod types;

pub use settings::{load_settings, parse_settings};
pub use types::*;
