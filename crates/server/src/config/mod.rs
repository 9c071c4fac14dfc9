mod server;
mod telemetry;


pub use server::*;
pub use telemetry::*;

use std::path::Path;

use mailform_email::MailConfig;
use serde::Deserialize;

use crate::error::ServerError;

/// Top-level configuration for the mailform server, loaded from a TOML file.
#[derive(Debug, Default, Deserialize)]
pub struct MailformConfig {
    /// HTTP server bind configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Upload directory configuration.
    #[serde(default)]
    pub uploads: UploadsConfig,
    /// Outbound mail configuration. `MAIL_*` environment variables override
    /// these values.
    #[serde(default)]
    pub mail: MailConfig,
    /// OpenTelemetry trace export configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl MailformConfig {
    /// Parse a configuration document.
    pub fn from_toml(contents: &str) -> Result<Self, ServerError> {
        toml::from_str(contents).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Load the configuration file at `path`, or defaults if it does not
    /// exist, then apply the `MAIL_*` environment overrides.
    ///
    /// Returns whether the file was found alongside the configuration.
    pub fn load(path: &Path) -> Result<(Self, bool), ServerError> {
        let found = path.exists();
        let mut config = if found {
            let contents = std::fs::read_to_string(path)?;
            Self::from_toml(&contents)?
        } else {
            Self::default()
        };

        config
            .mail
            .apply_env()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        Ok((config, found))
    }
}
