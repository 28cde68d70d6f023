use crate::error::ConfigError;
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

/// The configuration file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "finboard.toml";

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub logging: LoggingSettings,
    pub debug: bool,
    pub api_version: String,
}

/// Connection parameters for the PostgreSQL pool.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

/// Where the HTTP server listens and how much it accepts per request.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub body_limit_bytes: usize,
}

/// Bearer token signing parameters.
#[derive(Clone, Deserialize)]
pub struct AuthSettings {
    /// The HMAC key for access tokens. Never logged.
    pub secret_key: String,
    pub token_ttl_minutes: i64,
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("secret_key", &"<redacted>")
            .field("token_ttl_minutes", &self.token_ttl_minutes)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive such as `info` or `web_server=debug,info`.
    pub filter: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<String>,
    pub file_prefix: String,
}

impl ServerSettings {
    /// The address the HTTP listener binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            ConfigError::ValidationError(format!(
                "server.host '{}' is not an IP address",
                self.host
            ))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Settings {
    /// Rejects settings the application cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "database.url must be set (or DATABASE_URL)".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be greater than 0".to_string(),
            ));
        }
        if self.auth.secret_key.is_empty() {
            return Err(ConfigError::ValidationError(
                "auth.secret_key must be set".to_string(),
            ));
        }
        if self.auth.token_ttl_minutes <= 0 {
            return Err(ConfigError::ValidationError(
                "auth.token_ttl_minutes must be greater than 0".to_string(),
            ));
        }
        self.server.socket_addr()?;
        Ok(())
    }
}

fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(config::Config::builder()
        .set_default("database.url", "")?
        .set_default("database.max_connections", 10_i64)?
        .set_default("database.acquire_timeout_secs", 5_i64)?
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000_i64)?
        .set_default("server.body_limit_bytes", 1_048_576_i64)?
        .set_default("auth.secret_key", "")?
        .set_default("auth.token_ttl_minutes", 120_i64)?
        .set_default("logging.filter", "info")?
        .set_default("logging.file_prefix", "finboard.log")?
        .set_default("debug", false)?
        .set_default("api_version", "v1")?)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Settings, ConfigError> {
    let settings = builder.build()?.try_deserialize::<Settings>()?;
    settings.validate()?;
    Ok(settings)
}

/// Loads the application settings.
///
/// Sources are layered, later ones winning: built-in defaults, the TOML file at `path`
/// (or `finboard.toml` if present), `FINBOARD_*` environment variables using `__` between
/// nested keys (e.g. `FINBOARD_AUTH__SECRET_KEY`), and finally a plain `DATABASE_URL`.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(p) => File::from(p).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = with_defaults()?
        .add_source(file)
        .add_source(
            Environment::with_prefix("FINBOARD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?;

    finish(builder)
}

/// Builds settings from an in-memory TOML document layered over the defaults.
///
/// The environment is not consulted.
pub fn settings_from_toml(contents: &str) -> Result<Settings, ConfigError> {
    finish(with_defaults()?.add_source(File::from_str(contents, FileFormat::Toml)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [database]
        url = "postgres://localhost/finboard"

        [auth]
        secret_key = "s3cret"
    "#;

    #[test]
    fn defaults_fill_unspecified_sections() {
        let settings = settings_from_toml(MINIMAL).unwrap();
        assert_eq!(settings.database.max_connections, 10);
        assert_eq!(settings.database.acquire_timeout_secs, 5);
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.server.body_limit_bytes, 1_048_576);
        assert_eq!(settings.auth.token_ttl_minutes, 120);
        assert_eq!(settings.logging.filter, "info");
        assert!(settings.logging.directory.is_none());
        assert!(!settings.debug);
        assert_eq!(settings.api_version, "v1");
        assert_eq!(
            settings.server.socket_addr().unwrap(),
            "0.0.0.0:3000".parse().unwrap()
        );
    }

    #[test]
    fn file_values_override_defaults() {
        let toml = format!("{MINIMAL}\n[server]\nhost = \"127.0.0.1\"\nport = 8080\n");
        let settings = settings_from_toml(&toml).unwrap();
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 8080);
    }

    #[test]
    fn missing_secret_is_rejected() {
        let err = settings_from_toml("[database]\nurl = \"postgres://x\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(msg) if msg.contains("secret_key")));
    }

    #[test]
    fn missing_database_url_is_rejected() {
        let err = settings_from_toml("[auth]\nsecret_key = \"k\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(msg) if msg.contains("database.url")));
    }

    #[test]
    fn malformed_host_is_rejected() {
        let toml = format!("{MINIMAL}\n[server]\nhost = \"not an ip\"\n");
        assert!(matches!(
            settings_from_toml(&toml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let toml = MINIMAL.replace(
            "secret_key = \"s3cret\"",
            "secret_key = \"s3cret\"\ntoken_ttl_minutes = 0",
        );
        assert!(matches!(
            settings_from_toml(&toml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn secret_key_is_redacted_in_debug_output() {
        let settings = settings_from_toml(MINIMAL).unwrap();
        let rendered = format!("{:?}", settings.auth);
        assert!(!rendered.contains("s3cret"));
    }
}
