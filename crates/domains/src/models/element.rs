//! # Element
//!
//! The storage and idempotency unit of the feed: Action, Nudge, Item and
//! Message all implement [`Element`].

use serde::{de::DeserializeOwned, Serialize};

use super::ElementKind;
use crate::error::{FeedError, Result, ValidationError, ValidationIssue};

/// Sequence number given to every element created by default content.
pub const DEFAULT_SEQUENCE_NUMBER: i64 = 1;

pub trait Element: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: ElementKind;

    fn id(&self) -> &str;

    /// Assigned once at creation. Together with the ID it forms the
    /// duplicate-submission key.
    fn sequence_number(&self) -> i64;

    /// Structural check. Must not perform I/O.
    fn validate(&self) -> std::result::Result<(), ValidationError>;

    /// Validates, then renders the document that gets written to the store.
    fn validate_and_marshal(&self) -> Result<serde_json::Value> {
        self.validate().map_err(|source| FeedError::Validation {
            kind: Self::KIND,
            source,
        })?;
        serde_json::to_value(self).map_err(|source| FeedError::Decode {
            kind: Self::KIND,
            id: self.id().to_string(),
            source,
        })
    }

    /// Reads a stored document back and re-checks it.
    fn validate_and_unmarshal(value: serde_json::Value) -> Result<Self> {
        let id = value
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let element: Self = serde_json::from_value(value).map_err(|source| FeedError::Decode {
            kind: Self::KIND,
            id,
            source,
        })?;
        element.validate().map_err(|source| FeedError::Validation {
            kind: Self::KIND,
            source,
        })?;
        Ok(element)
    }
}

/// Accumulates field issues while an element validates itself.
#[derive(Debug, Default)]
pub(crate) struct Checks {
    issues: Vec<ValidationIssue>,
}

impl Checks {
    pub(crate) fn require(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.issues.push(ValidationIssue::new(field, "must not be empty"));
        }
        self
    }

    pub(crate) fn sequence(&mut self, value: i64) -> &mut Self {
        if value < 0 {
            self.issues
                .push(ValidationIssue::new("sequenceNumber", "must not be negative"));
        }
        self
    }

    pub(crate) fn nested(&mut self, prefix: &str, result: std::result::Result<(), ValidationError>) -> &mut Self {
        if let Err(err) = result {
            self.issues.extend(
                err.issues
                    .into_iter()
                    .map(|issue| ValidationIssue::new(format!("{prefix}.{}", issue.field), issue.message)),
            );
        }
        self
    }

    pub(crate) fn push(&mut self, field: &str, message: impl Into<String>) -> &mut Self {
        self.issues.push(ValidationIssue::new(field, message));
        self
    }

    pub(crate) fn finish(&mut self) -> std::result::Result<(), ValidationError> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(std::mem::take(&mut self.issues)))
        }
    }
}
