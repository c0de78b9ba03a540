//! Field-level validation error collection.
//!
//! Validators push every problem they find so clients receive the complete
//! list in one round trip rather than fixing fields one at a time.

use std::collections::BTreeMap;

use serde_json::json;

use crate::domain::Error;

/// Ordered map of field name to validation messages.
///
/// # Examples
/// ```
/// use jobboard::domain::FieldErrors;
///
/// let mut errors = FieldErrors::default();
/// errors.push("title", "Title must have at least 3 characters.");
/// let err = errors.into_result("job payload is invalid").unwrap_err();
/// let details = err.details().unwrap();
/// assert_eq!(details["fieldErrors"]["title"][0], "Title must have at least 3 characters.");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Record a message against `field`.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    /// Record every message in `messages` against `field`.
    pub fn extend(&mut self, field: &str, messages: impl IntoIterator<Item = String>) {
        for message in messages {
            self.push(field, message);
        }
    }

    /// Whether no field has failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Names of the fields that failed, in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Convert into an `invalid_request` error carrying `details.fieldErrors`.
    pub fn into_error(self, message: impl Into<String>) -> Error {
        Error::invalid_request(message).with_details(json!({ "fieldErrors": self.0 }))
    }

    /// `Ok(())` when empty, otherwise the error from [`Self::into_error`].
    pub fn into_result(self, message: impl Into<String>) -> Result<(), Error> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into_error(message))
        }
    }
}
