//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.

use std::env;
use std::sync::{OnceLock, RwLock};

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: u64,
    /// Fixed UTC offset of the scanning hosts, e.g. `+05:30`.
    pub host_utc_offset: String,
    /// IANA zone used when rendering stored instants.
    pub display_timezone: String,
    /// Wall-clock time (`HH:MM`, display zone) at which open sessions are closed.
    pub auto_close_time: String,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.into())
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Missing optional values fall back to development defaults. Only
    /// `DATABASE_PATH` and `JWT_SECRET` are required.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: var_or("APP_ENV", "development"),
            project_name: var_or("PROJECT_NAME", "rfid-attendance"),
            log_level: var_or("LOG_LEVEL", "api=info"),
            log_file: var_or("LOG_FILE", "api.log"),
            log_to_stdout: var_or("LOG_TO_STDOUT", "false") == "true",
            database_path: env::var("DATABASE_PATH").expect("DATABASE_PATH is required"),
            host: var_or("HOST", "127.0.0.1"),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET is required"),
            jwt_duration_minutes: env::var("JWT_DURATION_MINUTES")
                .ok()
                .and_then(|m| m.parse().ok())
                .unwrap_or(60),
            host_utc_offset: var_or("HOST_UTC_OFFSET", "+05:30"),
            display_timezone: var_or("DISPLAY_TIMEZONE", "Asia/Kolkata"),
            auto_close_time: var_or("AUTO_CLOSE_TIME", "23:59"),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock cannot be acquired.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock
                .write()
                .expect("Failed to acquire AppConfig write lock");
            *guard = AppConfig::from_env();
        }
    }

    /// Generic internal setter for any field in the config.
    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_log_level(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_level = value.into());
    }

    pub fn set_database_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.database_path = value.into());
    }

    pub fn set_jwt_secret(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.jwt_secret = value.into());
    }

    pub fn set_jwt_duration_minutes(value: impl Into<u64>) {
        AppConfig::set_field(|cfg| cfg.jwt_duration_minutes = value.into());
    }

    pub fn set_host_utc_offset(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.host_utc_offset = value.into());
    }

    pub fn set_display_timezone(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.display_timezone = value.into());
    }

    pub fn set_auto_close_time(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.auto_close_time = value.into());
    }
}

// --- Free accessors used by binaries and handlers ---

pub fn env() -> String {
    AppConfig::global().env.clone()
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn database_path() -> String {
    AppConfig::global().database_path.clone()
}

pub fn host() -> String {
    AppConfig::global().host.clone()
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn jwt_secret() -> String {
    AppConfig::global().jwt_secret.clone()
}

pub fn jwt_duration_minutes() -> u64 {
    AppConfig::global().jwt_duration_minutes
}

pub fn host_utc_offset() -> String {
    AppConfig::global().host_utc_offset.clone()
}

pub fn display_timezone() -> String {
    AppConfig::global().display_timezone.clone()
}

pub fn auto_close_time() -> String {
    AppConfig::global().auto_close_time.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn seed_required_env() {
        unsafe {
            env::set_var("DATABASE_PATH", "data/test.db");
            env::set_var("JWT_SECRET", "test_secret");
        }
    }

    #[test]
    #[serial]
    fn setters_override_loaded_values() {
        seed_required_env();
        AppConfig::reset();

        AppConfig::set_host_utc_offset("+02:00");
        AppConfig::set_display_timezone("Europe/Berlin");

        assert_eq!(host_utc_offset(), "+02:00");
        assert_eq!(display_timezone(), "Europe/Berlin");

        AppConfig::reset();
    }

    #[test]
    #[serial]
    fn time_settings_default_to_ist() {
        seed_required_env();
        unsafe {
            env::remove_var("HOST_UTC_OFFSET");
            env::remove_var("DISPLAY_TIMEZONE");
        }

        let cfg = AppConfig::from_env();
        assert_eq!(cfg.host_utc_offset, "+05:30");
        assert_eq!(cfg.display_timezone, "Asia/Kolkata");
        assert_eq!(cfg.auto_close_time, "23:59");
    }
}
