//! # Domain Models
//!
//! These structs represent the elements of a user's feed. Field names are
//! serialized in camelCase, which is the shape of the stored documents.

mod action;
mod element;
mod enums;
mod item;
mod link;
mod message;
mod nudge;

pub use action::Action;
pub use element::{Element, DEFAULT_SEQUENCE_NUMBER};
pub use enums::*;
pub use item::Item;
pub use link::Link;
pub use message::Message;
pub use nudge::Nudge;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Label given to welcome content and used as the first label of every user.
pub const DEFAULT_LABEL: &str = "WELCOME";

/// An aggregated, read-only view over a user's actions, nudges and items.
/// Never stored as a document of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feed {
    pub uid: String,
    pub flavour: Flavour,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_anonymous: Option<bool>,
    pub actions: Vec<Action>,
    pub nudges: Vec<Nudge>,
    pub items: Vec<Item>,
}

/// A post published through the CMS, as handed over by a `CmsSource`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmsPost {
    pub uuid: String,
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub excerpt: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub html: String,
    #[serde(default)]
    pub feature_image: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub published_at: DateTime<Utc>,
}

/// The CMS sends `null` for posts without an excerpt or body.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
