use std::env;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::error;
use tracing::{debug, warn};

use super::AppConfig;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Load the configuration and store it globally. Subsequent calls return the
/// already loaded instance.
pub fn init_config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::load)
}

/// Get the global configuration. Falls back to defaults when [`init_config`]
/// was never called (tests).
pub fn get_config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::default)
}

impl AppConfig {
    /// Load configuration from TOML file with environment variable fallback
    pub fn load() -> Self {
        let mut config = Self::load_from_file();
        config.override_with_env();
        config
    }

    /// Load configuration from TOML file
    fn load_from_file() -> Self {
        let config_paths = [
            "config.toml",
            "studycurve.toml",
            "config/config.toml",
            "/etc/studycurve/config.toml",
        ];

        for path in &config_paths {
            if Path::new(path).exists() {
                debug!("Loading config from: {}", path);
                match fs::read_to_string(path) {
                    Ok(content) => match toml::from_str::<AppConfig>(&content) {
                        Ok(config) => {
                            debug!("Successfully loaded config from: {}", path);
                            return config;
                        }
                        Err(e) => {
                            warn!("Failed to parse config file {}: {}", path, e);
                        }
                    },
                    Err(e) => {
                        warn!("Failed to read config file {}: {}", path, e);
                    }
                }
            }
        }

        debug!("No config file found, using defaults");
        Self::default()
    }

    /// Override configuration with environment variables
    fn override_with_env(&mut self) {
        // Server config
        if let Ok(host) = env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("SERVER_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            } else {
                error!("Invalid SERVER_PORT: {}", port);
            }
        }
        if let Ok(workers) = env::var("SERVER_WORKERS") {
            if let Ok(count) = workers.parse() {
                self.server.workers = count;
            } else {
                error!("Invalid SERVER_WORKERS: {}", workers);
            }
        }

        // Logging config
        if let Ok(level) = env::var("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(file) = env::var("LOG_FILE") {
            self.logging.file = if file.is_empty() { None } else { Some(file) };
        }

        // Upload config
        if let Ok(max_size) = env::var("MAX_UPLOAD_SIZE") {
            if let Ok(size) = max_size.parse::<usize>() {
                self.upload.max_size = size;
            } else {
                error!("Invalid MAX_UPLOAD_SIZE: {}", max_size);
            }
        }
    }
}
