use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

use crate::export::ExportFormat;

/// User-tunable settings. Everything has a default, so no config file is
/// required; a `gitscribe.toml` in the working directory overrides the
/// user-level file.
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// "xlsx" (default) or "csv".
    pub export_format: String,
    pub toast_duration_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            export_format: "xlsx".to_string(),
            toast_duration_ms: 3000,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(user_config) = user_config_path() {
            builder = builder.add_source(File::from(user_config).required(false));
        }

        let settings = builder
            .add_source(File::with_name("gitscribe").required(false))
            .build()?;

        settings.try_deserialize()
    }

    pub fn export_format(&self) -> ExportFormat {
        ExportFormat::from_name(&self.export_format).unwrap_or(ExportFormat::Workbook)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }
}

pub fn user_config_path() -> Option<PathBuf> {
    let mut path = dirs::home_dir()?;
    path.push(".config");
    path.push("gitscribe");
    path.push("gitscribe.toml");
    Some(path)
}
