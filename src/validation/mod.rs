//! Accumulating field validation.
//!
//! A [`Validator`] runs independent checks against the fields of one input and
//! records every failure instead of stopping at the first, so a caller can
//! report all problems in a single response.
//!
//! ## Example
//!
//! ```
//! use service_fnd::Validator;
//!
//! let mut v = Validator::new();
//! v.required_string("", "name.required")
//!     .valid_email("bad", "email.invalid")
//!     .max_length("0123456789", 5, "bio.max");
//!
//! let codes: Vec<_> = v.errors().iter().map(|e| e.code()).collect();
//! assert_eq!(codes, ["name.required", "email.invalid", "bio.max"]);
//! ```

mod email;
mod error;

pub use error::{ValidationError, ValidationErrors};

/// Collects validation failures for a single validation pass.
///
/// Use a fresh instance per input. Failures are append-only and kept in the
/// order the checks ran.
#[derive(Debug, Default, Clone)]
pub struct Validator {
    errors: Vec<ValidationError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `code` unconditionally.
    pub fn add_error(&mut self, code: impl Into<String>) -> &mut Self {
        self.errors.push(ValidationError::new(code));
        self
    }

    /// Fails when `value` is exactly empty. Whitespace counts as present.
    pub fn required_string(&mut self, value: &str, code: &str) -> &mut Self {
        if value.is_empty() {
            self.add_error(code);
        }
        self
    }

    /// Fails when a non-empty `value` is shorter than `min` bytes.
    ///
    /// Empty values are left to [`required_string`](Self::required_string).
    pub fn min_length(&mut self, value: &str, min: usize, code: &str) -> &mut Self {
        if !value.is_empty() && value.len() < min {
            self.add_error(code);
        }
        self
    }

    /// Fails when a non-empty `value` is longer than `max` bytes.
    pub fn max_length(&mut self, value: &str, max: usize, code: &str) -> &mut Self {
        if !value.is_empty() && value.len() > max {
            self.add_error(code);
        }
        self
    }

    /// Fails when a non-empty `value` is not a single mailbox address.
    ///
    /// Accepts a bare `local@domain` or a display-name form such as
    /// `Ann <ann@example.com>`, including quoted local parts and comments.
    /// Only syntax is checked.
    pub fn valid_email(&mut self, value: &str, code: &str) -> &mut Self {
        if !value.is_empty() && !email::is_mailbox(value) {
            self.add_error(code);
        }
        self
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the recorded failures in insertion order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Ends the pass, returning `Err` with every recorded failure if any.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(failures = self.errors.len(), "validation failed");
            Err(ValidationErrors::new(self.errors))
        }
    }
}
