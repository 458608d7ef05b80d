//! Configuration loading and validation.
//!
//! Everything comes from the environment and is validated once at
//! startup; a bad value aborts the process before any listener binds.

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Deployment environment name ("dev", "prod", ...).
    pub environment: String,

    /// Optional prefix all routes are nested under (e.g. "/api").
    pub route_prefix: Option<String>,

    pub port: u16,

    /// Faceit Data API key; must be a well-formed UUID token.
    pub faceit_api_key: String,

    /// Directory for the usage counter files.
    pub usage_dir: PathBuf,

    /// Optional JSON file with broadcast coverage entries.
    pub coverage_file: Option<PathBuf>,
}

impl AppConfig {
    /// Load and validate from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(get: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = get("ENVIRONMENT").unwrap_or_else(|| "dev".to_string());

        let route_prefix = match get("ROUTE_PREFIX") {
            Some(prefix) if prefix.is_empty() => None,
            Some(prefix) => {
                if !prefix.starts_with('/') {
                    return Err(ConfigError::Invalid {
                        var: "ROUTE_PREFIX",
                        reason: "must start with '/'".to_string(),
                    });
                }
                Some(prefix)
            }
            None => None,
        };

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                reason: format!("not a port number: {raw}"),
            })?,
            None => 3000,
        };

        let faceit_api_key = get("FACEIT_API_KEY").ok_or(ConfigError::Missing("FACEIT_API_KEY"))?;
        if Uuid::parse_str(&faceit_api_key).is_err() {
            return Err(ConfigError::Invalid {
                var: "FACEIT_API_KEY",
                reason: "not a UUID-shaped token".to_string(),
            });
        }

        let usage_dir = get("USAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./log-data"));

        let coverage_file = get("COVERAGE_FILE").map(PathBuf::from);

        Ok(Self {
            environment,
            route_prefix,
            port,
            faceit_api_key,
            usage_dir,
            coverage_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const KEY: &str = "11111111-2222-3333-4444-555555555555";

    fn load(vars: &[(&'static str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<&'static str, String> = vars
            .iter()
            .map(|(k, v)| (*k, v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| map.get(var).cloned())
    }

    #[test]
    fn test_defaults_with_only_api_key() {
        let config = load(&[("FACEIT_API_KEY", KEY)]).unwrap();

        assert_eq!(config.environment, "dev");
        assert_eq!(config.port, 3000);
        assert_eq!(config.route_prefix, None);
        assert_eq!(config.usage_dir, PathBuf::from("./log-data"));
        assert_eq!(config.coverage_file, None);
    }

    #[test]
    fn test_missing_api_key() {
        assert!(matches!(
            load(&[]),
            Err(ConfigError::Missing("FACEIT_API_KEY"))
        ));
    }

    #[test]
    fn test_malformed_api_key() {
        let result = load(&[("FACEIT_API_KEY", "not-a-uuid")]);
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { var: "FACEIT_API_KEY", .. })
        ));
    }

    #[test]
    fn test_route_prefix_must_be_rooted() {
        let result = load(&[("FACEIT_API_KEY", KEY), ("ROUTE_PREFIX", "api")]);
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { var: "ROUTE_PREFIX", .. })
        ));
    }

    #[test]
    fn test_empty_route_prefix_means_none() {
        let config = load(&[("FACEIT_API_KEY", KEY), ("ROUTE_PREFIX", "")]).unwrap();
        assert_eq!(config.route_prefix, None);
    }

    #[test]
    fn test_bad_port() {
        let result = load(&[("FACEIT_API_KEY", KEY), ("PORT", "eighty")]);
        assert!(matches!(result, Err(ConfigError::Invalid { var: "PORT", .. })));
    }

    #[test]
    fn test_full_configuration() {
        let config = load(&[
            ("FACEIT_API_KEY", KEY),
            ("ENVIRONMENT", "prod"),
            ("ROUTE_PREFIX", "/api"),
            ("PORT", "8080"),
            ("USAGE_DIR", "/var/log/relay"),
            ("COVERAGE_FILE", "/etc/relay/coverage.json"),
        ])
        .unwrap();

        assert_eq!(config.environment, "prod");
        assert_eq!(config.route_prefix.as_deref(), Some("/api"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.usage_dir, PathBuf::from("/var/log/relay"));
        assert_eq!(
            config.coverage_file,
            Some(PathBuf::from("/etc/relay/coverage.json"))
        );
    }
}
