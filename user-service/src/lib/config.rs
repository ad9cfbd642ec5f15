use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub token: TokenConfig,
    pub cookie: CookieConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct TokenConfig {
    pub secret: String,
    #[serde(default = "default_token_lifetime")]
    pub lifetime_seconds: i64,
}

// Keeps the secret out of startup logs.
impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("lifetime_seconds", &self.lifetime_seconds)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CookieConfig {
    #[serde(default = "default_cookie_name")]
    pub name: String,
    #[serde(default = "default_cookie_secure")]
    pub secure: bool,
}

fn default_token_lifetime() -> i64 {
    auth::token::DEFAULT_TOKEN_LIFETIME_SECONDS
}

fn default_cookie_name() -> String {
    "auth_token".to_string()
}

fn default_cookie_secure() -> bool {
    true
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, TOKEN__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: TOKEN__SECRET=... overrides token.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_config_debug_redacts_secret() {
        let token = TokenConfig {
            secret: "super-secret-value".to_string(),
            lifetime_seconds: 60,
        };

        let rendered = format!("{:?}", token);
        assert!(!rendered.contains("super-secret-value"));
        assert!(rendered.contains("lifetime_seconds: 60"));
    }

    #[test]
    fn test_defaults_fill_optional_fields() {
        let configuration = ConfigBuilder::builder()
            .set_override("server.http_port", 8080_i64)
            .unwrap()
            .set_override("database.url", "postgresql://localhost/users")
            .unwrap()
            .set_override("token.secret", "secret")
            .unwrap()
            .set_override("cookie.secure", false)
            .unwrap()
            .build()
            .unwrap();

        let config: Config = configuration.try_deserialize().unwrap();
        assert_eq!(config.token.lifetime_seconds, 86_400);
        assert_eq!(config.cookie.name, "auth_token");
        assert!(!config.cookie.secure);
    }
}
