// Fusen Settings Engine
// Loads client settings from a JSON file at the platform-specific config path,
// then applies `FUSEN_*` environment overrides (a `.env` file is honoured).

use std::env;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::ClientSettings;

pub const ENV_API_BASE_URL: &str = "FUSEN_API_BASE_URL";
pub const ENV_PAGE_SIZE: &str = "FUSEN_PAGE_SIZE";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "FUSEN_REQUEST_TIMEOUT_SECS";
pub const ENV_DESKTOP_MIN_WIDTH: &str = "FUSEN_DESKTOP_MIN_WIDTH";

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<ClientSettings, SettingsError>;
    fn get_settings(&self) -> &ClientSettings;
    fn get_config_path(&self) -> &str;
}

/// Settings engine reading a JSON file plus environment overrides.
pub struct SettingsEngine {
    config_path: String,
    settings: ClientSettings,
    use_env: bool,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses the platform-specific config directory with `settings.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string(),
        };

        Self {
            config_path,
            settings: ClientSettings::default(),
            use_env: true,
        }
    }

    /// Disables environment overrides; only the file is consulted.
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    fn read_file(path: &Path) -> Result<ClientSettings, SettingsError> {
        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })
    }

    fn apply_env(settings: &mut ClientSettings) -> Result<(), SettingsError> {
        if let Ok(url) = env::var(ENV_API_BASE_URL) {
            settings.api_base_url = url;
        }
        if let Some(size) = parse_env(ENV_PAGE_SIZE)? {
            settings.page_size = size;
        }
        if let Some(secs) = parse_env(ENV_REQUEST_TIMEOUT_SECS)? {
            settings.request_timeout_secs = secs;
        }
        if let Some(width) = parse_env(ENV_DESKTOP_MIN_WIDTH)? {
            settings.desktop_min_width = width;
        }
        Ok(())
    }

    fn validate(settings: &ClientSettings) -> Result<(), SettingsError> {
        if settings.api_base_url.trim().is_empty() {
            return Err(SettingsError::InvalidValue("api_base_url cannot be empty".to_string()));
        }
        if settings.page_size == 0 {
            return Err(SettingsError::InvalidValue("page_size must be positive".to_string()));
        }
        if settings.request_timeout_secs == 0 {
            return Err(SettingsError::InvalidValue(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>, SettingsError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| SettingsError::InvalidValue(format!("{}={}", key, raw))),
        Err(_) => Ok(None),
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file, then applies overrides.
    ///
    /// If the file does not exist, starts from default settings.
    /// If the file exists but is malformed, returns a serialization error.
    fn load(&mut self) -> Result<ClientSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        let mut settings = if path.exists() {
            Self::read_file(path)?
        } else {
            debug!(path = %self.config_path, "no settings file, using defaults");
            ClientSettings::default()
        };

        if self.use_env {
            dotenvy::dotenv().ok();
            Self::apply_env(&mut settings)?;
        }
        Self::validate(&settings)?;

        info!(api_base_url = %settings.api_base_url, page_size = settings.page_size, "settings loaded");
        self.settings = settings;
        Ok(self.settings.clone())
    }

    fn get_settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
