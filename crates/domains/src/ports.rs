//! # Ports
//!
//! Contracts between the feed core and the world around it. Adapters in
//! `storage-adapters` implement the store and CMS ports; `services`
//! implements [`DefaultContent`].

use async_trait::async_trait;

use crate::error::{CmsError, Result, StoreError};
use crate::filters::FeedFilters;
use crate::models::{Action, CmsPost, Feed, Flavour, Item, Message, Nudge};
use crate::store::{Document, Query};

/// Hierarchical document persistence. Paths are `/`-separated collection
/// paths; documents are JSON objects keyed by id within a collection.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Runs a query. An empty result is not an error.
    async fn query(&self, query: &Query) -> std::result::Result<Vec<Document>, StoreError>;

    async fn get(&self, collection: &str, id: &str) -> std::result::Result<Option<Document>, StoreError>;

    /// Create-or-replace.
    async fn set(&self, collection: &str, id: &str, data: serde_json::Value) -> std::result::Result<(), StoreError>;

    /// Atomic create-if-absent. Returns `false` when the document already exists.
    async fn create(&self, collection: &str, id: &str, data: serde_json::Value) -> std::result::Result<bool, StoreError>;

    /// Deleting a missing document succeeds.
    async fn delete(&self, collection: &str, id: &str) -> std::result::Result<(), StoreError>;
}

/// Published CMS content for a flavour's feed.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CmsSource: Send + Sync {
    async fn feed_content(&self, flavour: Flavour) -> std::result::Result<Vec<CmsPost>, CmsError>;
}

/// The per-user feed: aggregated reads plus element CRUD.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait FeedRepository: Send + Sync {
    /// Assembles the feed, seeding default content on the first unfiltered
    /// read of an empty feed.
    async fn get_feed(
        &self,
        uid: &str,
        is_anonymous: Option<bool>,
        flavour: Flavour,
        filters: &FeedFilters,
    ) -> Result<Feed>;

    async fn get_actions(&self, uid: &str, flavour: Flavour) -> Result<Vec<Action>>;
    async fn get_nudges(&self, uid: &str, flavour: Flavour, filters: &FeedFilters) -> Result<Vec<Nudge>>;
    async fn get_items(&self, uid: &str, flavour: Flavour, filters: &FeedFilters) -> Result<Vec<Item>>;

    // Items
    async fn get_feed_item(&self, uid: &str, flavour: Flavour, item_id: &str) -> Result<Option<Item>>;
    async fn save_feed_item(&self, uid: &str, flavour: Flavour, item: &Item) -> Result<Item>;
    async fn update_feed_item(&self, uid: &str, flavour: Flavour, item: &Item) -> Result<Item>;
    async fn delete_feed_item(&self, uid: &str, flavour: Flavour, item_id: &str) -> Result<()>;

    // Nudges
    async fn get_nudge(&self, uid: &str, flavour: Flavour, nudge_id: &str) -> Result<Option<Nudge>>;
    async fn save_nudge(&self, uid: &str, flavour: Flavour, nudge: &Nudge) -> Result<Nudge>;
    async fn update_nudge(&self, uid: &str, flavour: Flavour, nudge: &Nudge) -> Result<Nudge>;
    async fn delete_nudge(&self, uid: &str, flavour: Flavour, nudge_id: &str) -> Result<()>;
    async fn get_default_nudge_by_title(&self, uid: &str, flavour: Flavour, title: &str) -> Result<Nudge>;

    // Actions
    async fn get_action(&self, uid: &str, flavour: Flavour, action_id: &str) -> Result<Option<Action>>;
    async fn save_action(&self, uid: &str, flavour: Flavour, action: &Action) -> Result<Action>;
    async fn delete_action(&self, uid: &str, flavour: Flavour, action_id: &str) -> Result<()>;

    // Messages
    async fn post_message(&self, uid: &str, flavour: Flavour, item_id: &str, message: &Message) -> Result<Message>;
    async fn get_message(&self, uid: &str, flavour: Flavour, item_id: &str, message_id: &str) -> Result<Option<Message>>;
    async fn get_messages(&self, uid: &str, flavour: Flavour, item_id: &str) -> Result<Vec<Message>>;
    async fn delete_message(&self, uid: &str, flavour: Flavour, item_id: &str, message_id: &str) -> Result<()>;

    // Per-user metadata
    async fn labels(&self, uid: &str, flavour: Flavour) -> Result<Vec<String>>;
    async fn save_label(&self, uid: &str, flavour: Flavour, label: &str) -> Result<()>;
    async fn unread_persistent_items(&self, uid: &str, flavour: Flavour) -> Result<i64>;
    async fn update_unread_persistent_items_count(&self, uid: &str, flavour: Flavour) -> Result<()>;
}

/// Seeds a new user's feed and supplies CMS-sourced items.
///
/// The writers receive the repository to save through rather than holding
/// one, since the repository itself calls into this trait.
#[async_trait]
pub trait DefaultContent: Send + Sync {
    async fn set_default_actions(&self, uid: &str, flavour: Flavour, repository: &dyn FeedRepository) -> Result<Vec<Action>>;
    async fn set_default_nudges(&self, uid: &str, flavour: Flavour, repository: &dyn FeedRepository) -> Result<Vec<Nudge>>;
    async fn set_default_items(&self, uid: &str, flavour: Flavour, repository: &dyn FeedRepository) -> Result<Vec<Item>>;

    /// Items built from published CMS posts. CMS failures yield no items.
    async fn cms_items(&self, flavour: Flavour) -> Vec<Item>;
}
