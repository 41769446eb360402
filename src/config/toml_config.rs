use crate::domain::ports::ConfigProvider;
use crate::utils::error::{MoodleError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Connection settings loaded from the `[moodle]` table of a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodleConfig {
    pub moodle: MoodleSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodleSection {
    pub url: String,
    pub username: String,
    pub password: String,
    pub timeout_seconds: Option<u64>,
}

impl MoodleConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MoodleError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| MoodleError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Request timeout, defaulting to 30 seconds when the file does not set
    /// `timeout_seconds`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.moodle
                .timeout_seconds
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        )
    }
}

impl Validate for MoodleConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("moodle.url", &self.moodle.url)?;
        validation::validate_non_empty_string("moodle.username", &self.moodle.username)?;
        validation::validate_non_empty_string("moodle.password", &self.moodle.password)?;

        if let Some(timeout) = self.moodle.timeout_seconds {
            validation::validate_positive_number("moodle.timeout_seconds", timeout, 1)?;
        }

        Ok(())
    }
}

impl ConfigProvider for MoodleConfig {
    fn base_url(&self) -> &str {
        &self.moodle.url
    }

    fn username(&self) -> &str {
        &self.moodle.username
    }

    fn password(&self) -> &str {
        &self.moodle.password
    }

    fn request_timeout(&self) -> Duration {
        self.timeout()
    }
}
