use std::path::Path;

use super::env::{EnvSource, VarsSource};
use super::file::{DotenvSource, TomlFileSource};
use super::service::ServiceConfig;
use super::source::{ConfigSource, Settings};
use super::ConfigError;

/// Builder for loading [`ServiceConfig`] from layered sources.
///
/// Sources are applied in registration order, with later sources overriding
/// earlier ones key by key. Every source yields environment-variable style
/// keys (`DATABASE_URL`), so a value can come from a TOML file, a `.env` file,
/// the process environment or an explicit override interchangeably.
///
/// ## Example
///
/// ```no_run
/// use service_fnd::Config;
///
/// // defaults file -> .env -> process environment
/// let config = Config::builder()
///     .with_file("config/default.toml", false)
///     .with_dotenv(".env", false)
///     .with_env()
///     .build()?;
///
/// println!("listening on {}", config.address());
/// # Ok::<(), service_fnd::ConfigError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct Config {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl Config {
    /// Creates a new configuration builder.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Adds a TOML file to be loaded.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    /// Optional files that are missing are silently skipped.
    pub fn with_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_source(TomlFileSource::new(path, required))
    }

    /// Adds a `.env` file to be loaded.
    ///
    /// The file is read directly; the process environment is not modified.
    pub fn with_dotenv(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_source(DotenvSource::new(path, required))
    }

    /// Adds the process environment.
    pub fn with_env(self) -> Self {
        self.with_source(EnvSource)
    }

    /// Adds explicit key/value overrides.
    ///
    /// ```
    /// use service_fnd::{Config, Environment};
    ///
    /// let config = Config::builder()
    ///     .with_vars([("JWT_SECRET", "secret"), ("ENV", "test")])
    ///     .build()?;
    ///
    /// assert_eq!(config.env, Environment::Test);
    /// # Ok::<(), service_fnd::ConfigError>(())
    /// ```
    pub fn with_vars<I, K, V>(self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.with_source(VarsSource::new(vars))
    }

    /// Adds a custom source.
    pub fn with_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Loads and merges every source, then resolves the typed configuration.
    ///
    /// A missing required setting is returned as [`ConfigError::Missing`];
    /// deciding whether that aborts the process is left to the caller.
    pub fn build(self) -> Result<ServiceConfig, ConfigError> {
        let mut settings = Settings::default();

        for source in &self.sources {
            let entries = source.entries()?;
            tracing::trace!(?source, entries = entries.len(), "merging config source");
            settings.merge(entries);
        }

        let config = ServiceConfig::from_settings(&settings)?;
        tracing::debug!(
            env = %config.env,
            address = %config.address(),
            "configuration loaded"
        );
        Ok(config)
    }
}
