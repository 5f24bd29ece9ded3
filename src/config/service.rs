use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use super::source::Settings;
use super::ConfigError;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_PROTOCOL: &str = "http";
const DEFAULT_ACCESS_TOKEN_EXPIRY: Duration = Duration::from_secs(15 * 60);
const DEFAULT_REFRESH_TOKEN_EXPIRY: Duration = Duration::from_secs(7 * 24 * 60 * 60);
const DEFAULT_REFRESH_TOKEN_GRACE_PERIOD: Duration = Duration::from_secs(10);

/// Deployment environment a service runs in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Development,
    Test,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
            Self::Test => "test",
        }
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }

    pub fn is_development(self) -> bool {
        self == Self::Development
    }

    pub fn is_test(self) -> bool {
        self == Self::Test
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "production" => Ok(Self::Production),
            "development" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            other => Err(format!(
                "unknown environment '{other}', expected production, development or test"
            )),
        }
    }
}

/// Typed settings shared by every backend service.
///
/// Built once at startup through [`Config`](super::Config) or
/// [`ServiceConfig::from_env`]. The JWT secret is redacted from `Debug` output.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub protocol: String,
    /// Empty when `DATABASE_URL` is unset.
    pub database_url: String,
    pub jwt_secret: SecretString,
    pub access_token_expiry: Duration,
    pub refresh_token_expiry: Duration,
    pub refresh_token_grace_period: Duration,
    pub env: Environment,
}

impl ServiceConfig {
    /// Loads settings from `./.env` (if present) and the process environment.
    ///
    /// Variables already set in the process take precedence over the file.
    pub fn from_env() -> Result<Self, ConfigError> {
        super::Config::builder()
            .with_dotenv(".env", false)
            .with_env()
            .build()
    }

    /// `host:port`, suitable for binding a listener.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// `protocol://host:port`, suitable for building absolute links.
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }

    pub(super) fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        let port = match settings.get("PORT") {
            Some(raw) => raw.parse().map_err(|e| ConfigError::InvalidValue {
                key: "PORT",
                value: raw.to_string(),
                reason: format!("{e}"),
            })?,
            None => DEFAULT_PORT,
        };

        let jwt_secret = settings
            .get("JWT_SECRET")
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let env = match settings.get("ENV") {
            Some(raw) => raw.parse().map_err(|reason| ConfigError::InvalidValue {
                key: "ENV",
                value: raw.to_string(),
                reason,
            })?,
            None => Environment::default(),
        };

        Ok(Self {
            host: settings.get("HOST").unwrap_or(DEFAULT_HOST).to_string(),
            port,
            protocol: settings
                .get("PROTOCOL")
                .unwrap_or(DEFAULT_PROTOCOL)
                .to_string(),
            database_url: settings.get("DATABASE_URL").unwrap_or_default().to_string(),
            jwt_secret: SecretString::from(jwt_secret.to_string()),
            access_token_expiry: duration_or(
                settings,
                "ACCESS_TOKEN_EXPIRY",
                DEFAULT_ACCESS_TOKEN_EXPIRY,
            ),
            refresh_token_expiry: duration_or(
                settings,
                "REFRESH_TOKEN_EXPIRY",
                DEFAULT_REFRESH_TOKEN_EXPIRY,
            ),
            refresh_token_grace_period: duration_or(
                settings,
                "REFRESH_TOKEN_GRACE_PERIOD",
                DEFAULT_REFRESH_TOKEN_GRACE_PERIOD,
            ),
            env,
        })
    }
}

/// Parses a human-readable duration (`15m`, `168h`, `1h 30m`).
///
/// Unparsable values fall back to `default` with a warning.
fn duration_or(settings: &Settings, key: &str, default: Duration) -> Duration {
    let Some(raw) = settings.get(key) else {
        return default;
    };

    match humantime::parse_duration(raw) {
        Ok(duration) => duration,
        Err(e) => {
            tracing::warn!(
                key,
                value = raw,
                error = %e,
                default = %humantime::format_duration(default),
                "invalid duration, using default"
            );
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::source::ConfigEntry;
    use secrecy::ExposeSecret;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        let mut settings = Settings::default();
        settings.merge(
            pairs
                .iter()
                .map(|(k, v)| ConfigEntry::new(*k, *v))
                .collect(),
        );
        settings
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::from_settings(&settings(&[("JWT_SECRET", "s")])).unwrap();

        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 8000);
        assert_eq!(config.protocol, "http");
        assert_eq!(config.database_url, "");
        assert_eq!(config.jwt_secret.expose_secret(), "s");
        assert_eq!(config.access_token_expiry, Duration::from_secs(900));
        assert_eq!(config.refresh_token_expiry, Duration::from_secs(604_800));
        assert_eq!(config.refresh_token_grace_period, Duration::from_secs(10));
        assert_eq!(config.env, Environment::Production);
    }

    #[test]
    fn test_explicit_values() {
        let config = ServiceConfig::from_settings(&settings(&[
            ("JWT_SECRET", "s"),
            ("HOST", "0.0.0.0"),
            ("PORT", "9090"),
            ("PROTOCOL", "https"),
            ("DATABASE_URL", "postgres://localhost/app"),
            ("ACCESS_TOKEN_EXPIRY", "5m"),
            ("REFRESH_TOKEN_EXPIRY", "48h"),
            ("REFRESH_TOKEN_GRACE_PERIOD", "1h 30m"),
            ("ENV", "development"),
        ]))
        .unwrap();

        assert_eq!(config.address(), "0.0.0.0:9090");
        assert_eq!(config.base_url(), "https://0.0.0.0:9090");
        assert_eq!(config.database_url, "postgres://localhost/app");
        assert_eq!(config.access_token_expiry, Duration::from_secs(300));
        assert_eq!(config.refresh_token_expiry, Duration::from_secs(48 * 3600));
        assert_eq!(config.refresh_token_grace_period, Duration::from_secs(5400));
        assert!(config.env.is_development());
    }

    #[test]
    fn test_missing_jwt_secret() {
        let result = ServiceConfig::from_settings(&settings(&[("PORT", "8000")]));
        assert!(matches!(result, Err(ConfigError::Missing("JWT_SECRET"))));

        let result = ServiceConfig::from_settings(&settings(&[("JWT_SECRET", "")]));
        assert!(matches!(result, Err(ConfigError::Missing("JWT_SECRET"))));
    }

    #[test]
    fn test_invalid_duration_falls_back() {
        let config = ServiceConfig::from_settings(&settings(&[
            ("JWT_SECRET", "s"),
            ("ACCESS_TOKEN_EXPIRY", "soon"),
        ]))
        .unwrap();
        assert_eq!(config.access_token_expiry, DEFAULT_ACCESS_TOKEN_EXPIRY);
    }

    #[test]
    fn test_invalid_port() {
        let result =
            ServiceConfig::from_settings(&settings(&[("JWT_SECRET", "s"), ("PORT", "http")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { key: "PORT", .. })
        ));
    }

    #[test]
    fn test_invalid_env() {
        let result =
            ServiceConfig::from_settings(&settings(&[("JWT_SECRET", "s"), ("ENV", "staging")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { key: "ENV", .. })
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config =
            ServiceConfig::from_settings(&settings(&[("JWT_SECRET", "hunter2")])).unwrap();
        assert!(!format!("{config:?}").contains("hunter2"));
    }

    #[test]
    fn test_environment_round_trip() {
        for env in [
            Environment::Production,
            Environment::Development,
            Environment::Test,
        ] {
            assert_eq!(env.to_string().parse::<Environment>(), Ok(env));
        }
    }

    #[test]
    fn test_environment_serde_names_match_display() {
        #[derive(Deserialize)]
        struct Section {
            env: Environment,
        }

        let section: Section = toml::from_str("env = \"development\"").unwrap();
        assert_eq!(section.env, Environment::Development);
        assert_eq!(
            toml::Value::try_from(Environment::Test).unwrap().as_str(),
            Some("test")
        );
    }
}
