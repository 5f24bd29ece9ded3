//! Request-scoped identity.

use crate::Error;

/// Per-request scope carrying the authenticated caller, if any.
///
/// Created by the request entry point and passed by reference to the logic
/// that needs to know who is calling.
///
/// ## Example
///
/// ```
/// use service_fnd::{Error, RequestContext};
///
/// fn delete_note(ctx: &RequestContext, note_id: &str) -> Result<String, Error> {
///     let owner = ctx.require_owner()?;
///     Ok(format!("{owner} deleted {note_id}"))
/// }
///
/// let anonymous = RequestContext::anonymous();
/// assert!(matches!(delete_note(&anonymous, "n1"), Err(Error::Unauthenticated)));
///
/// let ctx = anonymous.with_owner_id("user-42");
/// assert_eq!(delete_note(&ctx, "n1")?, "user-42 deleted n1");
/// # Ok::<(), Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    owner_id: Option<String>,
}

impl RequestContext {
    /// A context with no authenticated caller.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Returns this context with `owner_id` as the authenticated caller.
    ///
    /// Replaces any owner already set.
    pub fn with_owner_id(self, owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: Some(owner_id.into()),
        }
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.owner_id.is_some()
    }

    /// Returns the caller's id, or [`Error::Unauthenticated`] when absent.
    pub fn require_owner(&self) -> Result<&str, Error> {
        self.owner_id().ok_or(Error::Unauthenticated)
    }
}
