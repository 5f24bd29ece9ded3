use crate::config::ConfigError;
#[cfg(feature = "postgres")]
use crate::db::DbError;
use crate::validation::ValidationErrors;
use thiserror::Error;

/// Top-level error type for service-fnd.
///
/// `NotFound` and `Unauthenticated` are the shared sentinels that request
/// handlers raise; match on the variant to test for them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("error.not-found")]
    NotFound,

    #[error("error.unauthenticated")]
    Unauthenticated,

    #[error("validation failed: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[cfg(feature = "postgres")]
    #[error("database error: {0}")]
    Database(#[from] DbError),
}

impl Error {
    /// Machine-readable code for the sentinel variants.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::NotFound => Some("error.not-found"),
            Self::Unauthenticated => Some("error.unauthenticated"),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Validator;

    #[test]
    fn test_sentinel_display_matches_code() {
        for err in [Error::NotFound, Error::Unauthenticated] {
            assert_eq!(Some(err.to_string().as_str()), err.code());
        }
        assert_eq!(Error::NotFound.to_string(), "error.not-found");
        assert_eq!(Error::Unauthenticated.to_string(), "error.unauthenticated");
    }

    #[test]
    fn test_sentinel_predicates() {
        assert!(Error::NotFound.is_not_found());
        assert!(!Error::NotFound.is_unauthenticated());
        assert!(Error::Unauthenticated.is_unauthenticated());
    }

    #[test]
    fn test_validation_failures_convert() {
        fn check(name: &str) -> Result<(), Error> {
            let mut v = Validator::new();
            v.required_string(name, "name.required");
            v.finish()?;
            Ok(())
        }

        assert!(check("Ann").is_ok());

        let err = check("").unwrap_err();
        assert!(matches!(&err, Error::Invalid(e) if e.codes().eq(["name.required"])));
        assert_eq!(err.code(), None);
        assert_eq!(err.to_string(), "validation failed: name.required");
    }

    #[test]
    fn test_config_error_converts() {
        let err = Error::from(ConfigError::Missing("JWT_SECRET"));
        assert_eq!(err.to_string(), "configuration error: JWT_SECRET is required");
    }
}
