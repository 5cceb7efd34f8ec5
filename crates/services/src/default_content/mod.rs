//! # Default Content
//!
//! Seeds an empty feed with the flavour's default actions, nudges and
//! welcome item, and turns published CMS posts into extra items.
//!
//! Everything is written through the [`FeedRepository`] handed in by the
//! caller, so the usual validation and duplicate checks apply. A failure
//! midway leaves whatever was already written in place.

pub mod catalog;
pub mod welcome;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use domains::{Action, CmsSource, DefaultContent, FeedRepository, FeedResultExt, Flavour, Item, Nudge, Result};
use tracing::{instrument, warn};

use crate::cms_items::item_from_cms_post;
use catalog::{new_id, DefaultAction, DefaultNudge};

/// The default items of a feed, in the order they are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultItem {
    Welcome,
}

impl DefaultItem {
    pub fn for_flavour(_flavour: Flavour) -> &'static [DefaultItem] {
        &[Self::Welcome]
    }

    async fn write(self, uid: &str, flavour: Flavour, repository: &dyn FeedRepository) -> Result<Item> {
        match self {
            Self::Welcome => {
                let now = Utc::now();
                let item_id = new_id();
                let conversations = welcome::post_thread(uid, flavour, &item_id, repository, now).await?;
                let item = welcome::welcome_item(uid, flavour, item_id, conversations, now);
                repository.save_feed_item(uid, flavour, &item).await
            }
        }
    }
}

#[derive(Default)]
pub struct DefaultContentGenerator {
    cms: Option<Arc<dyn CmsSource>>,
}

impl DefaultContentGenerator {
    /// A generator without CMS content.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cms(cms: Arc<dyn CmsSource>) -> Self {
        Self { cms: Some(cms) }
    }
}

#[async_trait]
impl DefaultContent for DefaultContentGenerator {
    #[instrument(skip(self, repository))]
    async fn set_default_actions(&self, uid: &str, flavour: Flavour, repository: &dyn FeedRepository) -> Result<Vec<Action>> {
        let mut saved = Vec::new();
        for action in DefaultAction::for_flavour(flavour) {
            let stored = repository
                .save_action(uid, flavour, &action.build())
                .await
                .context(format!("unable to save {} action", action.name()))?;
            saved.push(stored);
        }
        Ok(saved)
    }

    #[instrument(skip(self, repository))]
    async fn set_default_nudges(&self, uid: &str, flavour: Flavour, repository: &dyn FeedRepository) -> Result<Vec<Nudge>> {
        let now = Utc::now();
        let mut saved = Vec::new();
        for nudge in DefaultNudge::for_flavour(flavour) {
            let stored = repository
                .save_nudge(uid, flavour, &nudge.build(uid, now))
                .await
                .context(format!("unable to save {:?} nudge", nudge.title()))?;
            saved.push(stored);
        }
        Ok(saved)
    }

    #[instrument(skip(self, repository))]
    async fn set_default_items(&self, uid: &str, flavour: Flavour, repository: &dyn FeedRepository) -> Result<Vec<Item>> {
        let mut saved = Vec::new();
        for item in DefaultItem::for_flavour(flavour) {
            let stored = item
                .write(uid, flavour, repository)
                .await
                .context(format!("unable to save {item:?} item"))?;
            saved.push(stored);
        }
        Ok(saved)
    }

    #[instrument(skip(self))]
    async fn cms_items(&self, flavour: Flavour) -> Vec<Item> {
        let Some(cms) = &self.cms else {
            return Vec::new();
        };
        match cms.feed_content(flavour).await {
            Ok(posts) => {
                let now = Utc::now();
                posts.iter().map(|post| item_from_cms_post(post, now)).collect()
            }
            Err(err) => {
                warn!(error = %err, "unable to fetch CMS feed content; continuing without it");
                Vec::new()
            }
        }
    }
}
