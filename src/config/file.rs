//! File-based configuration sources.

use std::path::{Path, PathBuf};

use toml::{Table, Value};

use super::source::{ConfigEntry, ConfigSource};
use super::ConfigError;

/// A configuration source that loads from a TOML file.
///
/// Keys are flattened to environment-variable spelling: top-level keys are
/// upper-cased and nested tables are joined with `_`, so
///
/// ```toml
/// port = 8000
///
/// [database]
/// url = "postgres://localhost/app"
/// ```
///
/// yields `PORT=8000` and `DATABASE_URL=postgres://localhost/app`.
#[derive(Debug, Clone)]
pub struct TomlFileSource {
    path: PathBuf,
    required: bool,
}

impl TomlFileSource {
    /// Creates a new TOML file source.
    ///
    /// If `required` is true, the build will fail if the file doesn't exist.
    pub fn new(path: impl AsRef<Path>, required: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required,
        }
    }
}

impl ConfigSource for TomlFileSource {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        let Some(table) = load_toml_file(&self.path, self.required)? else {
            return Ok(vec![]);
        };

        let mut entries = Vec::new();
        flatten(&table, None, &mut entries)?;
        Ok(entries)
    }
}

/// Loads and parses a TOML config file.
///
/// Returns `Ok(None)` if the file doesn't exist and `required` is false.
fn load_toml_file(path: &Path, required: bool) -> Result<Option<Table>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let table = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;
            Ok(Some(table))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => missing(path, required),
        Err(e) => Err(ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

fn flatten(
    table: &Table,
    prefix: Option<&str>,
    out: &mut Vec<ConfigEntry>,
) -> Result<(), ConfigError> {
    for (key, value) in table {
        let key = match prefix {
            Some(prefix) => format!("{prefix}_{}", key.to_uppercase()),
            None => key.to_uppercase(),
        };

        match value {
            Value::Table(nested) => flatten(nested, Some(&key), out)?,
            Value::String(s) => out.push(ConfigEntry::new(key, s.clone())),
            Value::Integer(i) => out.push(ConfigEntry::new(key, i.to_string())),
            Value::Float(f) => out.push(ConfigEntry::new(key, f.to_string())),
            Value::Boolean(b) => out.push(ConfigEntry::new(key, b.to_string())),
            Value::Datetime(dt) => out.push(ConfigEntry::new(key, dt.to_string())),
            Value::Array(_) => return Err(ConfigError::NonScalarValue(key)),
        }
    }
    Ok(())
}

/// A configuration source that reads a `.env` file.
///
/// The file is parsed into entries; the process environment is left untouched.
#[derive(Debug, Clone)]
pub struct DotenvSource {
    path: PathBuf,
    required: bool,
}

impl DotenvSource {
    pub fn new(path: impl AsRef<Path>, required: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required,
        }
    }
}

impl ConfigSource for DotenvSource {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        let dotenv_error = |source| ConfigError::DotenvError {
            path: self.path.clone(),
            source,
        };

        let iter = match dotenv::from_path_iter(&self.path) {
            Ok(iter) => iter,
            Err(dotenv::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                missing::<()>(&self.path, self.required)?;
                return Ok(vec![]);
            }
            Err(e) => return Err(dotenv_error(e)),
        };

        iter.map(|item| {
            item.map(|(key, value)| ConfigEntry::new(key, value))
                .map_err(dotenv_error)
        })
        .collect()
    }
}

fn missing<T>(path: &Path, required: bool) -> Result<Option<T>, ConfigError> {
    if required {
        Err(ConfigError::FileNotFound(path.to_path_buf()))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn value<'a>(entries: &'a [ConfigEntry], key: &str) -> Option<&'a str> {
        entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    #[test]
    fn test_toml_source_flattens_tables() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "port = 9000\nenv = \"test\"\n\n[database]\nurl = \"postgres://db/app\""
        )
        .unwrap();

        let entries = TomlFileSource::new(file.path(), true).entries().unwrap();

        assert_eq!(value(&entries, "PORT"), Some("9000"));
        assert_eq!(value(&entries, "ENV"), Some("test"));
        assert_eq!(value(&entries, "DATABASE_URL"), Some("postgres://db/app"));
    }

    #[test]
    fn test_toml_source_rejects_arrays() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "hosts = [\"a\", \"b\"]").unwrap();

        let result = TomlFileSource::new(file.path(), true).entries();
        assert!(matches!(result, Err(ConfigError::NonScalarValue(k)) if k == "HOSTS"));
    }

    #[test]
    fn test_toml_source_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "port = ").unwrap();

        let result = TomlFileSource::new(file.path(), true).entries();
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_toml_source_required_missing() {
        let source = TomlFileSource::new("/nonexistent/path/config.toml", true);
        assert!(matches!(source.entries(), Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_toml_source_optional_missing() {
        let source = TomlFileSource::new("/nonexistent/path/config.toml", false);
        assert!(source.entries().unwrap().is_empty());
    }

    #[test]
    fn test_dotenv_source_reads_pairs() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# comment\nJWT_SECRET=s3cret\nHOST=\"example.com\"").unwrap();

        let entries = DotenvSource::new(file.path(), true).entries().unwrap();

        assert_eq!(value(&entries, "JWT_SECRET"), Some("s3cret"));
        assert_eq!(value(&entries, "HOST"), Some("example.com"));
    }

    #[test]
    fn test_dotenv_source_missing() {
        let optional = DotenvSource::new("/nonexistent/.env", false);
        assert!(optional.entries().unwrap().is_empty());

        let required = DotenvSource::new("/nonexistent/.env", true);
        assert!(matches!(
            required.entries(),
            Err(ConfigError::FileNotFound(_))
        ));
    }
}
