use std::env;

use boomabrovers_client::TransportConfig;
use boomabrovers_notification::EmailConfig;
use config::{Config as ConfigBuilder, ConfigError, Environment, File, Map};
use serde::Deserialize;

/// Unprefixed variables honored for existing deployments.
const LEGACY_VARS: [(&str, &str); 9] = [
    ("DATABASE_URL", "database.url"),
    ("PORT", "server.port"),
    ("SMTP_HOST", "email.smtp_host"),
    ("SMTP_PORT", "email.smtp_port"),
    ("SMTP_SECURE", "email.smtp_secure"),
    ("SMTP_USER", "email.smtp_username"),
    ("SMTP_PASS", "email.smtp_password"),
    ("SMTP_FROM", "email.from_address"),
    ("ADMIN_EMAIL", "email.admin_address"),
];

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 5000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:boomabrovers.db".to_owned(),
            max_connections: 5,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AdminConfig {
    /// Bearer token for the listing and status endpoints. Unset locks them.
    #[serde(default)]
    pub api_token: Option<String>,
}

impl AdminConfig {
    pub fn token(&self) -> Option<&str> {
        self.api_token.as_deref().filter(|token| !token.is_empty())
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ClientConfig {
    #[serde(default)]
    pub transport: TransportConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy variables (DATABASE_URL, PORT, SMTP_*, ADMIN_EMAIL)
    /// 2. Prefixed variables (BOOMABROVERS__DATABASE__URL, etc.)
    /// 3. Config file specified by path, CONFIG_PATH, or config/default.toml
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        Self::load_with_vars(config_path, env::vars().collect())
    }

    pub fn load_with_vars(
        config_path: Option<String>,
        vars: Map<String, String>,
    ) -> Result<Self, ConfigError> {
        let server = ServerConfig::default();
        let database = DatabaseConfig::default();

        let mut builder = ConfigBuilder::builder()
            .set_default("server.host", server.host)?
            .set_default("server.port", server.port)?
            .set_default("database.url", database.url)?
            .set_default("database.max_connections", database.max_connections)?;

        let config_file_path = config_path
            .or_else(|| vars.get("CONFIG_PATH").cloned())
            .unwrap_or_else(|| "config/default.toml".to_owned());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("BOOMABROVERS")
                .separator("__")
                .try_parsing(true)
                .source(Some(vars.clone())),
        );

        for (var, key) in LEGACY_VARS {
            if let Some(value) = vars.get(var) {
                builder = builder.set_override(key, value.to_owned())?;
            }
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_owned());
        }
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_owned());
        }
        if self.email.admin_address.trim().is_empty() {
            return Err("Admin notification address must be set".to_owned());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use temp_dir::TempDir;

    use super::*;

    #[test]
    fn test_validation_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_connections() {
        let mut config = Config::default();
        config.database.max_connections = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_admin_address() {
        let mut config = Config::default();
        config.email.admin_address = " ".to_owned();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_load_defaults() {
        let config = Config::load_with_vars(Some("missing.toml".to_owned()), Map::new()).unwrap();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.url, "sqlite:boomabrovers.db");
        assert_eq!(config.admin.token(), None);
        assert_eq!(config.client.transport, TransportConfig::default());
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_load_layers() {
        let dir = TempDir::new().unwrap();
        let path = dir.child("config.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 8080

[admin]
api_token = "from-file"

[email]
smtp_host = "mail.internal"

[client.transport]
kind = "form_relay"
service_id = "svc"
template_id = "tpl"
public_key = "pk"
"#,
        )
        .unwrap();

        let vars = Map::from([
            ("BOOMABROVERS__ADMIN__API_TOKEN".to_owned(), "from-env".to_owned()),
            ("PORT".to_owned(), "9090".to_owned()),
            ("SMTP_SECURE".to_owned(), "true".to_owned()),
            ("ADMIN_EMAIL".to_owned(), "office@boomabrovers.com".to_owned()),
        ]);

        let config =
            Config::load_with_vars(Some(path.to_string_lossy().into_owned()), vars).unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.admin.token(), Some("from-env"));
        assert_eq!(config.email.smtp_host, "mail.internal");
        assert!(config.email.smtp_secure);
        assert_eq!(config.email.admin_address, "office@boomabrovers.com");
        assert!(matches!(
            config.client.transport,
            TransportConfig::FormRelay { .. }
        ));
    }
}
