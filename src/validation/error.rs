use std::fmt;

use thiserror::Error;

/// A single field-level validation failure.
///
/// Carries only the caller-chosen code (e.g. `"email.invalid"`), which is
/// also its display text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("{code}")]
pub struct ValidationError {
    code: String,
}

impl ValidationError {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

/// All failures from one validation pass, in the order they were recorded.
///
/// Produced by [`Validator::finish`](super::Validator::finish). Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub(super) fn new(errors: Vec<ValidationError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self { errors }
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(ValidationError::code)
    }

    pub fn into_inner(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(error.code())?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
