//! Configuration types for Callpane
//!
//! Defines:
//! - `Settings` - Global application settings
//! - One section struct per `[table]` of `config.toml`

use std::path::PathBuf;

use callpane_core::{RandomConfig, DEFAULT_TEXT_WIDTH};
use serde::{Deserialize, Serialize};

/// Global settings from `.callpane/config.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub random: RandomSettings,

    #[serde(default)]
    pub service: ServiceSettings,
}

/// Layout and formatting
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// Entries kept in the console before the oldest are evicted
    pub console_capacity: usize,

    /// Height of the console pane in rows
    pub console_height: u16,

    /// Rows shown per result pane
    pub result_max_lines: usize,

    /// Column width for pretty-printing values in the text view
    pub text_width: usize,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            console_capacity: 1000,
            console_height: 8,
            result_max_lines: 8,
            text_width: DEFAULT_TEXT_WIDTH,
        }
    }
}

/// Bounds for values generated by "Lucky"
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RandomSettings {
    pub max_vec_len: usize,
    pub max_text_len: usize,

    /// Fixed seed for reproducible values
    pub seed: Option<u64>,
}

impl Default for RandomSettings {
    fn default() -> Self {
        let cfg = RandomConfig::default();
        Self {
            max_vec_len: cfg.max_vec_len,
            max_text_len: cfg.max_text_len,
            seed: None,
        }
    }
}

impl RandomSettings {
    pub fn to_config(&self) -> RandomConfig {
        RandomConfig {
            max_vec_len: self.max_vec_len,
            max_text_len: self.max_text_len,
        }
    }
}

/// Defaults for the service when none is given on the command line
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Interface description file
    pub interface: Option<PathBuf>,

    /// Command to spawn, program first
    pub command: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.ui.console_capacity, 1000);
        assert_eq!(settings.ui.console_height, 8);
        assert_eq!(settings.ui.text_width, 80);
        assert_eq!(settings.random.max_vec_len, 3);
        assert!(settings.random.seed.is_none());
        assert!(settings.service.command.is_empty());
    }

    #[test]
    fn test_partial_tables_keep_defaults() {
        let settings: Settings = toml::from_str(
            r#"
[ui]
console_capacity = 10

[random]
seed = 7
"#,
        )
        .unwrap();

        assert_eq!(settings.ui.console_capacity, 10);
        assert_eq!(settings.ui.result_max_lines, 8);
        assert_eq!(settings.random.seed, Some(7));
        assert_eq!(settings.random.max_text_len, 8);
    }

    #[test]
    fn test_service_section() {
        let settings: Settings = toml::from_str(
            r#"
[service]
interface = "api.did"
command = ["python3", "server.py"]
"#,
        )
        .unwrap();

        assert_eq!(
            settings.service.interface,
            Some(PathBuf::from("api.did"))
        );
        assert_eq!(settings.service.command, vec!["python3", "server.py"]);
    }

    #[test]
    fn test_random_settings_to_config() {
        let random = RandomSettings {
            max_vec_len: 1,
            max_text_len: 2,
            seed: Some(3),
        };
        assert_eq!(
            random.to_config(),
            RandomConfig {
                max_vec_len: 1,
                max_text_len: 2
            }
        );
    }
}
