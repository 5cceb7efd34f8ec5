//! # FeedError
//!
//! Centralized error handling for the feed repository and its collaborators.
//! Not-found is never an error here: lookups return `Ok(None)` instead.

use thiserror::Error;

use crate::models::ElementKind;

/// The primary error type for all feed operations.
#[derive(Error, Debug)]
pub enum FeedError {
    /// A repository invariant (e.g. a configured store) does not hold.
    #[error("repository precondition check failed: {0}")]
    Precondition(String),

    /// An element failed its structural check. Raised before any I/O.
    #[error("{kind} failed validation: {source}")]
    Validation {
        kind: ElementKind,
        #[source]
        source: ValidationError,
    },

    /// An `is_new` save found a document with the same ID and sequence number.
    #[error("an element with the same ID ({id}) and sequence number ({sequence_number}) exists")]
    DuplicateElement { id: String, sequence_number: i64 },

    /// The document store failed while performing `action`.
    #[error("unable to {action}: {source}")]
    Store {
        action: String,
        #[source]
        source: StoreError,
    },

    /// A stored document could not be read back into its element type.
    #[error("unable to unmarshal {kind} from document {id}: {source}")]
    Decode {
        kind: ElementKind,
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no default nudge titled {title:?}")]
    NudgeNotFound { title: String },

    /// A per-user metadata document exists but has the wrong shape.
    #[error("malformed metadata document: {0}")]
    MalformedMetadata(String),

    /// Wraps a lower-level failure with what was being attempted.
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<FeedError>,
    },
}

impl FeedError {
    pub fn store(action: impl Into<String>, source: StoreError) -> Self {
        Self::Store {
            action: action.into(),
            source,
        }
    }

    /// Follows the `Context` chain down to the error that started it.
    pub fn root(&self) -> &FeedError {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self.root(), Self::DuplicateElement { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self.root(), Self::Validation { .. })
    }
}

/// Adds `"unable to X: <cause>"` style context to feed results.
pub trait FeedResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> FeedResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|source| FeedError::Context {
            context: context.into(),
            source: Box::new(source),
        })
    }
}

/// Failures reported by a `DocumentStore` implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failures reported by a `CmsSource` implementation. Always non-fatal to
/// feed assembly.
#[derive(Error, Debug)]
pub enum CmsError {
    #[error("cms request failed: {0}")]
    Request(String),

    #[error("cms request timed out")]
    Timeout,

    #[error("unable to decode cms response: {0}")]
    Decode(String),
}

/// Collection of validation issues found on one element.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation errors: {issues:?}")]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new<I>(issues: I) -> Self
    where
        I: IntoIterator<Item = ValidationIssue>,
    {
        Self {
            issues: issues.into_iter().collect(),
        }
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new([ValidationIssue::new(field, message)])
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A specialized Result type for feed logic.
pub type Result<T> = std::result::Result<T, FeedError>;
