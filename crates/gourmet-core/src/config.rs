use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
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
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can use a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let non_empty = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("GOURMET_ENV", "development"))?;
    let log_level = or_default("GOURMET_LOG_LEVEL", "info");

    let api_key = non_empty("GOURMET_API_KEY");
    let api_base_url = or_default(
        "GOURMET_API_BASE_URL",
        "https://webservice.recruit.co.jp/hotpepper/",
    );
    if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
        return Err(ConfigError::InvalidEnvVar {
            var: "GOURMET_API_BASE_URL".to_string(),
            reason: format!("'{api_base_url}' is not an http(s) URL"),
        });
    }

    let request_timeout_secs = parse_u64("GOURMET_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("GOURMET_USER_AGENT", "gourmet/0.1 (restaurant-search)");
    let locate_timeout_secs = parse_u64("GOURMET_LOCATE_TIMEOUT_SECS", "10")?;
    let bookmarks_dir = PathBuf::from(or_default("GOURMET_BOOKMARKS_DIR", "./.gourmet"));
    let amenity_keywords_path = non_empty("GOURMET_AMENITY_KEYWORDS_PATH").map(PathBuf::from);

    Ok(AppConfig {
        env,
        log_level,
        api_key,
        api_base_url,
        request_timeout_secs,
        user_agent,
        locate_timeout_secs,
        bookmarks_dir,
        amenity_keywords_path,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "GOURMET_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
