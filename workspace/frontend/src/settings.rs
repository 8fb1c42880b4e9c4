use std::cell::RefCell;
use std::time::Duration;

use log::Level;
use web_sys::window;

/// Global application settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Base URL of the chart API, without a trailing slash
    /// (e.g. "https://api.example.com/api")
    pub api_base_url: String,

    /// Default log level for the application
    pub log_level: Level,

    /// Lifetime of a durable cache entry in milliseconds
    pub cache_expiration_ms: u64,

    /// Enable debug mode
    pub debug_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api".to_string(),
            log_level: Level::Info,
            cache_expiration_ms: 60 * 60 * 1000,
            debug_mode: false,
        }
    }
}

impl AppSettings {
    /// Create settings from the window location and localStorage overrides
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        if let Some(window) = window() {
            if let Ok(hostname) = window.location().hostname() {
                settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";

                // In development, use more verbose logging
                if settings.debug_mode {
                    settings.log_level = Level::Debug;
                }
            }

            if let Ok(Some(storage)) = window.local_storage() {
                settings.apply_overrides(|key| storage.get_item(key).ok().flatten());
            }
        }

        settings
    }

    /// Applies every override `lookup` knows about. Values that fail to
    /// parse leave the current setting unchanged.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup("energia_api_base_url") {
            let base_url = base_url.trim().trim_end_matches('/');
            if !base_url.is_empty() {
                self.api_base_url = base_url.to_string();
            }
        }

        if let Some(level) = lookup("energia_log_level") {
            if let Ok(level) = level.trim().parse::<Level>() {
                self.log_level = level;
            }
        }

        if let Some(expiration) = lookup("energia_cache_expiration_ms") {
            if let Ok(expiration) = expiration.trim().parse::<u64>() {
                self.cache_expiration_ms = expiration;
            }
        }
    }

    /// Get the full API URL for an endpoint
    pub fn api_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base_url, endpoint)
    }

    pub fn cache_expiration(&self) -> Duration {
        Duration::from_millis(self.cache_expiration_ms)
    }
}

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::from_environment());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}
