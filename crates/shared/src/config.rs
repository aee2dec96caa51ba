//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Token issuer embedded in and required from every access token.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Token audience embedded in and required from every access token.
    #[serde(default = "default_audience")]
    pub audience: String,
    /// Access token expiration in minutes.
    #[serde(default = "default_access_token_minutes")]
    pub access_token_minutes: i64,
    /// Refresh token expiration in days.
    #[serde(default = "default_refresh_token_days")]
    pub refresh_token_days: i64,
}

fn default_issuer() -> String {
    "cashup-api".to_string()
}

fn default_audience() -> String {
    "cashup-client".to_string()
}

fn default_access_token_minutes() -> i64 {
    15
}

fn default_refresh_token_days() -> i64 {
    7
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CASHUP").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jwt_settings_apply_defaults() {
        let json = serde_json::json!({ "secret": "s" });
        let settings: JwtSettings = serde_json::from_value(json).unwrap();

        assert_eq!(settings.issuer, "cashup-api");
        assert_eq!(settings.audience, "cashup-client");
        assert_eq!(settings.access_token_minutes, 15);
        assert_eq!(settings.refresh_token_days, 7);
    }

    #[test]
    fn server_config_defaults_to_all_interfaces() {
        let config: ServerConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn database_config_pool_defaults() {
        let config: DatabaseConfig =
            serde_json::from_value(serde_json::json!({ "url": "postgres://localhost/cashup" }))
                .unwrap();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
    }
}
