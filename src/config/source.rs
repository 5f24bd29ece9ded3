use std::collections::HashMap;

use super::ConfigError;

/// A single `KEY=value` pair produced by a source.
///
/// Keys use environment-variable spelling (`DATABASE_URL`) regardless of
/// where the value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
}

impl ConfigEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

pub trait ConfigSource: Send + Sync + std::fmt::Debug {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError>;
}

/// Flat key/value view over all merged sources.
#[derive(Debug, Default, Clone)]
pub struct Settings {
    values: HashMap<String, String>,
}

impl Settings {
    /// Applies entries on top of the current values.
    pub fn merge(&mut self, entries: Vec<ConfigEntry>) {
        for entry in entries {
            self.values.insert(entry.key, entry.value);
        }
    }

    /// Returns the value for `key`, treating an empty string as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_entries_override() {
        let mut settings = Settings::default();
        settings.merge(vec![ConfigEntry::new("PORT", "8000")]);
        settings.merge(vec![ConfigEntry::new("PORT", "9000")]);
        assert_eq!(settings.get("PORT"), Some("9000"));
    }

    #[test]
    fn test_empty_value_is_unset() {
        let mut settings = Settings::default();
        settings.merge(vec![ConfigEntry::new("HOST", "")]);
        assert_eq!(settings.get("HOST"), None);
        assert_eq!(settings.get("MISSING"), None);
    }
}
