//! Collection paths for a user's feed.
//!
//! ```text
//! {root}/{FLAVOUR}/{uid}/elements/actions/{id}
//! {root}/{FLAVOUR}/{uid}/elements/items/{id}/messages/{id}
//! {root}/{FLAVOUR}/{uid}/item_labels
//! ```

use domains::{ElementKind, Flavour};

pub const FEED_COLLECTION: &str = "feed";
const ELEMENTS_GROUP: &str = "elements";
const MESSAGES_SUBCOLLECTION: &str = "messages";

/// Per-user document holding `{labels: [..]}`.
pub const LABELS_DOC_ID: &str = "item_labels";
/// Per-user document holding `{count: n}`.
pub const UNREAD_INBOX_COUNTS_DOC_ID: &str = "unread_inbox_counts";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionLocator {
    root: String,
}

impl Default for CollectionLocator {
    fn default() -> Self {
        Self::new(None)
    }
}

impl CollectionLocator {
    /// `suffix` separates environments sharing one store, e.g. `feed_testing`.
    pub fn new(suffix: Option<&str>) -> Self {
        let root = match suffix.map(str::trim).filter(|s| !s.is_empty()) {
            Some(suffix) => format!("{FEED_COLLECTION}_{suffix}"),
            None => FEED_COLLECTION.to_string(),
        };
        Self { root }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Collection holding the user's metadata documents and the `elements` group.
    pub fn user(&self, uid: &str, flavour: Flavour) -> String {
        format!("{}/{}/{}", self.root, flavour.as_str(), uid)
    }

    pub fn elements(&self, uid: &str, flavour: Flavour, kind: ElementKind) -> String {
        format!("{}/{ELEMENTS_GROUP}/{}", self.user(uid, flavour), kind.collection_name())
    }

    pub fn messages(&self, uid: &str, flavour: Flavour, item_id: &str) -> String {
        format!(
            "{}/{item_id}/{MESSAGES_SUBCOLLECTION}",
            self.elements(uid, flavour, ElementKind::Item)
        )
    }
}
