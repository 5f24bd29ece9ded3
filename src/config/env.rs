use super::source::{ConfigEntry, ConfigSource};
use super::ConfigError;

/// Reads settings from the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        // Non-UTF-8 variables cannot hold any setting we read; skip them.
        Ok(std::env::vars_os()
            .filter_map(|(key, value)| {
                Some(ConfigEntry::new(
                    key.into_string().ok()?,
                    value.into_string().ok()?,
                ))
            })
            .collect())
    }
}

/// Explicit key/value pairs supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct VarsSource {
    vars: Vec<ConfigEntry>,
}

impl VarsSource {
    pub fn new<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| ConfigEntry::new(k, v))
                .collect(),
        }
    }
}

impl ConfigSource for VarsSource {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        Ok(self.vars.clone())
    }
}
