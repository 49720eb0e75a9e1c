use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Credentials for the externally-managed data store. Both fields are
/// optional on purpose: when either is missing the dashboard runs in
/// degraded mode and every page shows its placeholder instead of data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default)]
    pub service_key: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            service_key: None,
            max_connections: default_max_connections(),
        }
    }
}

fn default_max_connections() -> u32 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub ttl_seconds: i64,
}

impl Config {
    pub fn from_toml() -> anyhow::Result<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => toml::from_str(&config_str)
                .map_err(|e| anyhow::anyhow!("failed to parse {config_path}: {e}"))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // No config file: build from environment variables alone.
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    backend: BackendConfig {
                        database_url: get_env("DATABASE_URL"),
                        service_key: get_env("SERVICE_KEY"),
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    session: SessionConfig {
                        secret: get_env("SESSION_SECRET")
                            .unwrap_or_else(|| "change-me-in-production".to_string()),
                        ttl_seconds: get_env_parse("SESSION_TTL_SECONDS", 28_800i64),
                    },
                }
            }
            Err(e) => {
                return Err(anyhow::anyhow!("failed to read {config_path}: {e}"));
            }
        };

        // Environment variables win even when the file exists.
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.backend.database_url = Some(v);
        }
        if let Ok(v) = env::var("SERVICE_KEY") {
            config.backend.service_key = Some(v);
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.backend.max_connections = mc;
        }
        if let Ok(v) = env::var("SESSION_SECRET") {
            config.session.secret = v;
        }
        if let Ok(v) = env::var("SESSION_TTL_SECONDS")
            && let Ok(n) = v.parse()
        {
            config.session.ttl_seconds = n;
        }

        Ok(config)
    }
}

impl BackendConfig {
    /// The backend is usable only when both credentials are present.
    pub fn is_configured(&self) -> bool {
        self.database_url.is_some() && self.service_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_without_backend_section_parses_to_unconfigured() {
        let config: Config = toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [session]
            secret = "s"
            ttl_seconds = 3600
            "#,
        )
        .unwrap();

        assert!(!config.backend.is_configured());
        assert_eq!(config.backend.max_connections, 10);
    }

    #[test]
    fn backend_configured_requires_both_credentials() {
        let mut backend = BackendConfig::default();
        assert!(!backend.is_configured());

        backend.database_url = Some("postgres://localhost/ops".to_string());
        assert!(!backend.is_configured());

        backend.service_key = Some("service-key".to_string());
        assert!(backend.is_configured());
    }
}
