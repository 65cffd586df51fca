//! Settings loader for `.callpane/config.toml`

use std::path::Path;

use callpane_core::prelude::*;

use super::types::Settings;

const CALLPANE_DIR: &str = ".callpane";
const CONFIG_FILENAME: &str = "config.toml";

/// Load settings from `.callpane/config.toml` under `project_path`
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(project_path: &Path) -> Settings {
    let config_path = project_path.join(CALLPANE_DIR).join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    let loaded = std::fs::read_to_string(&config_path)
        .map_err(Error::from)
        .and_then(|content| parse_settings(&content));

    match loaded {
        Ok(settings) => {
            debug!("Loaded settings from {:?}", config_path);
            settings
        }
        Err(e) => {
            warn!("Ignoring {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Parse the contents of a config file
pub fn parse_settings(content: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(content).map_err(|e| Error::config(e.to_string()))?;
    Ok(sanitize(settings))
}

/// Clamp values that would make the UI unusable
fn sanitize(mut settings: Settings) -> Settings {
    // Room for at least one call line and its result
    if settings.ui.console_capacity < 2 {
        warn!("ui.console_capacity must be at least 2, using 2");
        settings.ui.console_capacity = 2;
    }
    if settings.ui.result_max_lines == 0 {
        settings.ui.result_max_lines = 1;
    }
    if settings.ui.text_width < 20 {
        settings.ui.text_width = 20;
    }
    settings
}
