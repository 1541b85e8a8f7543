#![allow(clippy::multiple_crate_versions)]

use serde::{Deserialize, Serialize};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

pub const APP_NAME: &str = "pdmtools";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub show_reservoir: bool,
    #[serde(default)]
    pub show_insulin: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_reservoir: true,
            show_insulin: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiConfig {
    #[serde(default = "default_true")]
    pub refresh_on_start: bool,
    /// Seconds between automatic status refreshes; 0 disables polling.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            refresh_on_start: true,
            refresh_interval_secs: default_refresh_interval(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PdmConfig {
    /// Base URL of the PDM REST service, e.g. "http://raspberrypi:4444".
    #[serde(default)]
    pub api_url: String,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub tui: TuiConfig,
}

const fn default_true() -> bool {
    true
}

const fn default_refresh_interval() -> u64 {
    30
}

#[derive(Debug, thiserror::Error)]
pub enum PdmConfigError {
    #[error("config error: {0}")]
    Confy(#[from] confy::ConfyError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("missing service address in config; set `api_url` in the pdmtools config file")]
    MissingApiUrl,
    #[error(
        "service address required but stdin is not interactive; set `api_url` in {path} (example: api_url = \"http://raspberrypi:4444\")",
        path = .path.display()
    )]
    NonInteractive { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, PdmConfigError>;

impl PdmConfig {
    /// Loads the config file from the standard OS location.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read or deserialized.
    pub fn load() -> Result<Self> {
        Ok(confy::load(APP_NAME, None)?)
    }

    /// Loads config or walks the user through entering the service address.
    ///
    /// # Errors
    /// Returns an error if the config cannot be loaded or onboarding fails
    /// (including non-interactive stdin).
    pub fn load_or_onboard() -> Result<Self> {
        let config = Self::load()?;
        if !config.api_url.trim().is_empty() {
            return Ok(config);
        }
        config.onboard_api_url()
    }

    /// Stores the config to the standard OS location.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn store(&self) -> Result<()> {
        confy::store(APP_NAME, None, self)?;
        Ok(())
    }

    /// The configured service address, normalized to end with a slash.
    ///
    /// # Errors
    /// Returns an error if no address is configured.
    pub fn api_url(&self) -> Result<String> {
        let trimmed = self.api_url.trim();
        if trimmed.is_empty() {
            return Err(PdmConfigError::MissingApiUrl);
        }
        if trimmed.ends_with('/') {
            Ok(trimmed.to_string())
        } else {
            Ok(format!("{trimmed}/"))
        }
    }

    fn onboard_api_url(mut self) -> Result<Self> {
        let config_path = confy::get_configuration_file_path(APP_NAME, None)?;
        if !io::stdin().is_terminal() {
            return Err(PdmConfigError::NonInteractive { path: config_path });
        }

        if !config_path.as_os_str().is_empty() {
            eprintln!(
                "PDM config not found or missing api_url. It will be stored at: {}",
                config_path.display()
            );
        }

        eprint!("Enter the PDM service address (e.g. http://raspberrypi:4444): ");
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PdmConfigError::MissingApiUrl);
        }

        self.api_url = trimmed.to_string();
        self.store()?;
        Ok(self)
    }
}
