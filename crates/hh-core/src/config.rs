use crate::app_config::{AppConfig, Environment};
use crate::weather::find_province;
use crate::ConfigError;

pub const DEFAULT_REQUESTS_KEY: &str = "hungers_harmony_admin_requests";
pub const DEFAULT_OPENING_KEY: &str = "hungers_harmony_opening_shown";

/// Storage keys are non-empty, use only `[A-Za-z0-9_.-]`, and do not start
/// with a dot.
#[must_use]
pub fn is_valid_storage_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let storage_key = |var: &str, default: &str| -> Result<String, ConfigError> {
        let key = or_default(var, default);
        if !is_valid_storage_key(&key) {
            return Err(invalid(
                var,
                format!(
                    "'{key}' must be non-empty, contain only [A-Za-z0-9_.-] and not start with '.'"
                ),
            ));
        }
        Ok(key)
    };

    let env = parse_environment(&or_default("HH_ENV", "development"))?;

    let bind_addr = parse_addr("HH_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("HH_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("HH_DATA_DIR", "./data"));
    let catalog_path = PathBuf::from(or_default("HH_CATALOG_PATH", "./config/catalog.yaml"));

    let requests_key = storage_key("HH_REQUESTS_KEY", DEFAULT_REQUESTS_KEY)?;
    let opening_key = storage_key("HH_OPENING_KEY", DEFAULT_OPENING_KEY)?;
    if requests_key == opening_key {
        return Err(invalid(
            "HH_OPENING_KEY",
            "must differ from HH_REQUESTS_KEY".to_string(),
        ));
    }

    let default_province = or_default("HH_DEFAULT_PROVINCE", "jakarta");
    if find_province(&default_province).is_none() {
        return Err(invalid(
            "HH_DEFAULT_PROVINCE",
            format!("unknown province '{default_province}'"),
        ));
    }

    let weather_base_url = or_default("HH_WEATHER_BASE_URL", "https://api.open-meteo.com/");
    let weather_timeout_secs = parse_u64("HH_WEATHER_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        data_dir,
        catalog_path,
        requests_key,
        opening_key,
        default_province,
        weather_base_url,
        weather_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "HH_ENV".to_string(),
            reason: format!("expected development, test or production, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
