//! # Feed Repository
//!
//! [`FeedRepository`] over any [`DocumentStore`].
//!
//! A feed read fetches actions, nudges and items, then checks whether the
//! user has anything at all. The first unfiltered read of an empty feed
//! seeds default content and fetches once more:
//!
//! ```text
//! fetch -> empty & unfiltered? -> ensure_initialized -> fetch -> Feed
//!                 \-> Feed
//! ```
//!
//! Seeding is serialized per `(uid, flavour)`. The lock holder re-checks
//! emptiness, so concurrent first reads seed once and different users never
//! wait on each other.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use domains::{
    Action, BooleanFilter, DefaultContent, DocumentStore, ElementKind, Feed, FeedError, FeedFilters, FeedRepository,
    FeedResultExt, Flavour, Item, Message, Nudge, Result,
};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::collections::CollectionLocator;
use crate::element_store::ElementStore;
use crate::{metadata, query};

type InitLocks = DashMap<(String, Flavour), Arc<Mutex<()>>>;

/// A caller's hold on the init lock of one feed. On drop the entry leaves
/// the table unless another caller still holds it, so the table only has
/// entries for feeds being initialized right now.
struct InitLockEntry<'a> {
    locks: &'a InitLocks,
    key: (String, Flavour),
    lock: Arc<Mutex<()>>,
}

impl<'a> InitLockEntry<'a> {
    fn acquire(locks: &'a InitLocks, uid: &str, flavour: Flavour) -> Self {
        let key = (uid.to_string(), flavour);
        let lock = locks.entry(key.clone()).or_default().clone();
        Self { locks, key, lock }
    }
}

impl Drop for InitLockEntry<'_> {
    fn drop(&mut self) {
        // held only by the table and by us
        self.locks.remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 2);
    }
}

pub struct DocumentFeedRepository {
    store: Arc<dyn DocumentStore>,
    elements: ElementStore,
    locator: CollectionLocator,
    defaults: Arc<dyn DefaultContent>,
    init_locks: InitLocks,
}

/// Stored elements from one fetch. CMS items are never part of a snapshot.
struct Snapshot {
    actions: Vec<Action>,
    nudges: Vec<Nudge>,
    items: Vec<Item>,
}

impl Snapshot {
    fn is_empty(&self) -> bool {
        self.actions.is_empty() && self.nudges.is_empty() && self.items.is_empty()
    }
}

impl DocumentFeedRepository {
    pub fn new(store: Arc<dyn DocumentStore>, locator: CollectionLocator, defaults: Arc<dyn DefaultContent>) -> Self {
        Self {
            elements: ElementStore::new(store.clone()),
            store,
            locator,
            defaults,
            init_locks: DashMap::new(),
        }
    }

    pub fn locator(&self) -> &CollectionLocator {
        &self.locator
    }

    fn check_preconditions(&self, uid: &str) -> Result<()> {
        if uid.trim().is_empty() {
            return Err(FeedError::Precondition("a feed needs a non-empty uid".into()));
        }
        if uid.contains('/') {
            return Err(FeedError::Precondition(format!("uid {uid:?} must not contain '/'")));
        }
        Ok(())
    }

    fn collection(&self, uid: &str, flavour: Flavour, kind: ElementKind) -> String {
        self.locator.elements(uid, flavour, kind)
    }

    async fn fetch(&self, uid: &str, flavour: Flavour, filters: &FeedFilters) -> Result<Snapshot> {
        let actions = self.get_actions(uid, flavour).await.context("unable to get actions")?;
        let nudges = self
            .get_nudges(uid, flavour, filters)
            .await
            .context("unable to get nudges")?;
        let items = self
            .stored_items(uid, flavour, filters)
            .await
            .context("unable to get items")?;
        Ok(Snapshot { actions, nudges, items })
    }

    /// Items from the store, each with its message thread.
    async fn stored_items(&self, uid: &str, flavour: Flavour, filters: &FeedFilters) -> Result<Vec<Item>> {
        let query = query::items(self.collection(uid, flavour, ElementKind::Item), filters, Utc::now());
        let mut items: Vec<Item> = self.elements.list(&query).await?;
        for item in &mut items {
            item.conversations = self
                .get_messages(uid, flavour, &item.id)
                .await
                .context("can't get feed item messages")?;
        }
        Ok(items)
    }

    /// CMS items that pass the same filters as stored items. Items whose ID
    /// is already present are skipped.
    async fn cms_items(&self, flavour: Flavour, filters: &FeedFilters, present: &HashSet<String>) -> Vec<Item> {
        let query = query::items(String::new(), filters, Utc::now());
        self.defaults
            .cms_items(flavour)
            .await
            .into_iter()
            .filter(|item| !present.contains(&item.id))
            .filter(|item| match serde_json::to_value(item) {
                Ok(doc) => query.matches(&doc),
                Err(err) => {
                    warn!(id = %item.id, error = %err, "dropping unserializable CMS item");
                    false
                }
            })
            .collect()
    }

    /// Seeds default content unless the feed already has some. Returns
    /// whether this call did the seeding.
    #[instrument(skip(self), fields(flavour = %flavour))]
    async fn ensure_initialized(&self, uid: &str, flavour: Flavour) -> Result<bool> {
        let entry = InitLockEntry::acquire(&self.init_locks, uid, flavour);
        let _guard = entry.lock.lock().await;

        // another reader may have seeded while we waited
        if !self.fetch(uid, flavour, &FeedFilters::default()).await?.is_empty() {
            debug!("feed already initialized");
            return Ok(false);
        }

        self.defaults
            .set_default_actions(uid, flavour, self)
            .await
            .context("unable to set default actions")?;
        self.defaults
            .set_default_nudges(uid, flavour, self)
            .await
            .context("unable to set default nudges")?;
        self.defaults
            .set_default_items(uid, flavour, self)
            .await
            .context("unable to set default items")?;

        info!("default feed initialized");
        Ok(true)
    }

    /// An unreadable thread is treated as not started yet.
    async fn thread_or_empty(&self, uid: &str, flavour: Flavour, item_id: &str) -> Vec<Message> {
        match self.get_messages(uid, flavour, item_id).await {
            Ok(messages) => messages,
            Err(err) => {
                debug!(item_id, error = %err, "no readable thread for item");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl FeedRepository for DocumentFeedRepository {
    #[instrument(skip(self, filters), fields(flavour = %flavour))]
    async fn get_feed(
        &self,
        uid: &str,
        is_anonymous: Option<bool>,
        flavour: Flavour,
        filters: &FeedFilters,
    ) -> Result<Feed> {
        self.check_preconditions(uid)?;

        let mut snapshot = self.fetch(uid, flavour, filters).await?;
        if filters.is_unfiltered() && snapshot.is_empty() {
            self.ensure_initialized(uid, flavour)
                .await
                .context("unable to initialize default feed")?;
            snapshot = self.fetch(uid, flavour, filters).await?;
        }

        let present: HashSet<String> = snapshot.items.iter().map(|i| i.id.clone()).collect();
        let cms_items = self.cms_items(flavour, filters, &present).await;
        snapshot.items.extend(cms_items);

        Ok(Feed {
            uid: uid.to_string(),
            flavour,
            is_anonymous,
            actions: snapshot.actions,
            nudges: snapshot.nudges,
            items: snapshot.items,
        })
    }

    async fn get_actions(&self, uid: &str, flavour: Flavour) -> Result<Vec<Action>> {
        self.check_preconditions(uid)?;
        let query = query::actions(self.collection(uid, flavour, ElementKind::Action));
        self.elements.list(&query).await
    }

    async fn get_nudges(&self, uid: &str, flavour: Flavour, filters: &FeedFilters) -> Result<Vec<Nudge>> {
        self.check_preconditions(uid)?;
        let query = query::nudges(self.collection(uid, flavour, ElementKind::Nudge), filters, Utc::now());
        self.elements.list(&query).await
    }

    async fn get_items(&self, uid: &str, flavour: Flavour, filters: &FeedFilters) -> Result<Vec<Item>> {
        self.check_preconditions(uid)?;
        let mut items = self.stored_items(uid, flavour, filters).await?;
        let present: HashSet<String> = items.iter().map(|i| i.id.clone()).collect();
        let cms_items = self.cms_items(flavour, filters, &present).await;
        items.extend(cms_items);
        Ok(items)
    }

    async fn get_feed_item(&self, uid: &str, flavour: Flavour, item_id: &str) -> Result<Option<Item>> {
        self.check_preconditions(uid)?;
        let item: Option<Item> = self
            .elements
            .get(self.collection(uid, flavour, ElementKind::Item), item_id)
            .await
            .context("unable to get item")?;
        let Some(mut item) = item else {
            return Ok(None);
        };
        item.conversations = self.thread_or_empty(uid, flavour, item_id).await;
        Ok(Some(item))
    }

    #[instrument(skip(self, item), fields(flavour = %flavour, item_id = %item.id))]
    async fn save_feed_item(&self, uid: &str, flavour: Flavour, item: &Item) -> Result<Item> {
        self.check_preconditions(uid)?;
        self.elements
            .save(self.collection(uid, flavour, ElementKind::Item), item, true)
            .await
            .context("unable to save item")?;
        let mut saved = item.clone();
        saved.conversations = self.thread_or_empty(uid, flavour, &item.id).await;
        Ok(saved)
    }

    async fn update_feed_item(&self, uid: &str, flavour: Flavour, item: &Item) -> Result<Item> {
        self.check_preconditions(uid)?;
        self.elements
            .save(self.collection(uid, flavour, ElementKind::Item), item, false)
            .await
            .context("unable to update item")?;
        let mut saved = item.clone();
        saved.conversations = self.thread_or_empty(uid, flavour, &item.id).await;
        Ok(saved)
    }

    async fn delete_feed_item(&self, uid: &str, flavour: Flavour, item_id: &str) -> Result<()> {
        self.check_preconditions(uid)?;
        self.elements
            .delete(&self.collection(uid, flavour, ElementKind::Item), item_id)
            .await
            .context("can't delete item")
    }

    async fn get_nudge(&self, uid: &str, flavour: Flavour, nudge_id: &str) -> Result<Option<Nudge>> {
        self.check_preconditions(uid)?;
        self.elements
            .get(self.collection(uid, flavour, ElementKind::Nudge), nudge_id)
            .await
            .context("unable to get nudge")
    }

    #[instrument(skip(self, nudge), fields(flavour = %flavour, nudge_id = %nudge.id))]
    async fn save_nudge(&self, uid: &str, flavour: Flavour, nudge: &Nudge) -> Result<Nudge> {
        self.check_preconditions(uid)?;
        self.elements
            .save(self.collection(uid, flavour, ElementKind::Nudge), nudge, true)
            .await
            .context("unable to save nudge")?;
        Ok(nudge.clone())
    }

    async fn update_nudge(&self, uid: &str, flavour: Flavour, nudge: &Nudge) -> Result<Nudge> {
        self.check_preconditions(uid)?;
        self.elements
            .save(self.collection(uid, flavour, ElementKind::Nudge), nudge, false)
            .await
            .context("unable to update nudge")?;
        Ok(nudge.clone())
    }

    async fn delete_nudge(&self, uid: &str, flavour: Flavour, nudge_id: &str) -> Result<()> {
        self.check_preconditions(uid)?;
        self.elements
            .delete(&self.collection(uid, flavour, ElementKind::Nudge), nudge_id)
            .await
            .context("can't delete nudge")
    }

    /// Looks across every status and visibility, since default nudges are
    /// usually looked up to be resolved or shown again.
    async fn get_default_nudge_by_title(&self, uid: &str, flavour: Flavour, title: &str) -> Result<Nudge> {
        self.check_preconditions(uid)?;
        let query = query::nudges_titled(self.collection(uid, flavour, ElementKind::Nudge), title);
        let nudges: Vec<Nudge> = self.elements.list(&query).await.context("unable to get nudges")?;
        nudges.into_iter().next().ok_or_else(|| FeedError::NudgeNotFound {
            title: title.to_string(),
        })
    }

    async fn get_action(&self, uid: &str, flavour: Flavour, action_id: &str) -> Result<Option<Action>> {
        self.check_preconditions(uid)?;
        self.elements
            .get(self.collection(uid, flavour, ElementKind::Action), action_id)
            .await
            .context("unable to get action")
    }

    #[instrument(skip(self, action), fields(flavour = %flavour, action = %action.name))]
    async fn save_action(&self, uid: &str, flavour: Flavour, action: &Action) -> Result<Action> {
        self.check_preconditions(uid)?;
        self.elements
            .save(self.collection(uid, flavour, ElementKind::Action), action, true)
            .await
            .context("unable to save action")?;
        Ok(action.clone())
    }

    async fn delete_action(&self, uid: &str, flavour: Flavour, action_id: &str) -> Result<()> {
        self.check_preconditions(uid)?;
        self.elements
            .delete(&self.collection(uid, flavour, ElementKind::Action), action_id)
            .await
            .context("can't delete action")
    }

    async fn post_message(&self, uid: &str, flavour: Flavour, item_id: &str, message: &Message) -> Result<Message> {
        self.check_preconditions(uid)?;
        self.elements
            .save(self.locator.messages(uid, flavour, item_id), message, true)
            .await
            .context("unable to save message")?;
        Ok(message.clone())
    }

    async fn get_message(
        &self,
        uid: &str,
        flavour: Flavour,
        item_id: &str,
        message_id: &str,
    ) -> Result<Option<Message>> {
        self.check_preconditions(uid)?;
        self.elements
            .get(self.locator.messages(uid, flavour, item_id), message_id)
            .await
            .context("unable to get message")
    }

    async fn get_messages(&self, uid: &str, flavour: Flavour, item_id: &str) -> Result<Vec<Message>> {
        self.check_preconditions(uid)?;
        let query = query::messages(self.locator.messages(uid, flavour, item_id));
        self.elements.list(&query).await
    }

    async fn delete_message(&self, uid: &str, flavour: Flavour, item_id: &str, message_id: &str) -> Result<()> {
        self.check_preconditions(uid)?;
        self.elements
            .delete(&self.locator.messages(uid, flavour, item_id), message_id)
            .await
            .context("can't delete message")
    }

    async fn labels(&self, uid: &str, flavour: Flavour) -> Result<Vec<String>> {
        self.check_preconditions(uid)?;
        metadata::labels(self.store.as_ref(), &self.locator.user(uid, flavour)).await
    }

    async fn save_label(&self, uid: &str, flavour: Flavour, label: &str) -> Result<()> {
        self.check_preconditions(uid)?;
        metadata::save_label(self.store.as_ref(), &self.locator.user(uid, flavour), label)
            .await
            .context("unable to save label")
    }

    async fn unread_persistent_items(&self, uid: &str, flavour: Flavour) -> Result<i64> {
        self.check_preconditions(uid)?;
        metadata::unread_count(self.store.as_ref(), &self.locator.user(uid, flavour)).await
    }

    /// Recounts persistent items under the default lifecycle filters.
    async fn update_unread_persistent_items_count(&self, uid: &str, flavour: Flavour) -> Result<()> {
        self.check_preconditions(uid)?;
        let filters = FeedFilters::default().persistent(BooleanFilter::True);
        let query = query::items(self.collection(uid, flavour, ElementKind::Item), &filters, Utc::now());
        let count = self
            .store
            .query(&query)
            .await
            .map_err(|source| FeedError::store("count persistent items", source))?
            .len();
        metadata::set_unread_count(self.store.as_ref(), &self.locator.user(uid, flavour), count as i64)
            .await
            .context("can't set unread count")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDocumentStore;
    use chrono::Duration;
    use domains::{ActionType, Handling, Link, Status, TextType, Visibility};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const UID: &str = "user-1";

    fn action(id: &str) -> Action {
        Action {
            id: id.into(),
            sequence_number: 1,
            name: "GET_TEST".into(),
            icon: Link::svg_image("https://assets.example.com/get_tested.svg", "", "", ""),
            action_type: ActionType::Primary,
            handling: Handling::FullPage,
            allow_anonymous: false,
        }
    }

    fn item(id: &str, persistent: bool) -> Item {
        let now = Utc::now();
        Item {
            id: id.into(),
            sequence_number: 1,
            expiry: now + Duration::days(30),
            persistent,
            status: Status::Pending,
            visibility: Visibility::Show,
            icon: Link::png_image("https://assets.example.com/logo.png", "", "", ""),
            author: "Be.Well Team".into(),
            tagline: String::new(),
            label: "WELCOME".into(),
            timestamp: now,
            summary: String::new(),
            text: "hello".into(),
            text_type: TextType::Markdown,
            links: vec![],
            actions: vec![],
            conversations: vec![],
            users: vec![UID.into()],
            groups: vec![],
            notification_channels: vec![],
        }
    }

    fn message(id: &str) -> Message {
        Message {
            id: id.into(),
            sequence_number: 1,
            text: "hi".into(),
            reply_to: None,
            posted_by_uid: "system".into(),
            posted_by_name: "Be.Well".into(),
            timestamp: Utc::now(),
        }
    }

    /// Seeds one action and one item per call and counts calls.
    #[derive(Default)]
    struct CountingDefaults {
        seeded: AtomicUsize,
        cms: Vec<Item>,
    }

    #[async_trait]
    impl DefaultContent for CountingDefaults {
        async fn set_default_actions(
            &self,
            uid: &str,
            flavour: Flavour,
            repository: &dyn FeedRepository,
        ) -> Result<Vec<Action>> {
            self.seeded.fetch_add(1, Ordering::SeqCst);
            // give concurrent readers a chance to pile up behind the lock
            tokio::task::yield_now().await;
            Ok(vec![repository.save_action(uid, flavour, &action("seeded")).await?])
        }

        async fn set_default_nudges(&self, _: &str, _: Flavour, _: &dyn FeedRepository) -> Result<Vec<Nudge>> {
            Ok(vec![])
        }

        async fn set_default_items(
            &self,
            uid: &str,
            flavour: Flavour,
            repository: &dyn FeedRepository,
        ) -> Result<Vec<Item>> {
            Ok(vec![repository.save_feed_item(uid, flavour, &item("welcome", true)).await?])
        }

        async fn cms_items(&self, _: Flavour) -> Vec<Item> {
            self.cms.clone()
        }
    }

    fn repository(defaults: Arc<CountingDefaults>) -> DocumentFeedRepository {
        DocumentFeedRepository::new(
            Arc::new(MemoryDocumentStore::new()),
            CollectionLocator::new(Some("testing")),
            defaults,
        )
    }

    #[tokio::test]
    async fn first_unfiltered_read_seeds_once() {
        let defaults = Arc::new(CountingDefaults::default());
        let repo = repository(defaults.clone());

        let feed = repo.get_feed(UID, None, Flavour::Consumer, &FeedFilters::default()).await.unwrap();
        assert_eq!(feed.actions.len(), 1);
        assert_eq!(feed.items.len(), 1);

        let again = repo.get_feed(UID, None, Flavour::Consumer, &FeedFilters::default()).await.unwrap();
        assert_eq!(again.actions, feed.actions);
        assert_eq!(defaults.seeded.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn filtered_reads_never_seed() {
        let defaults = Arc::new(CountingDefaults::default());
        let repo = repository(defaults.clone());

        let filters = FeedFilters::default().persistent(BooleanFilter::True);
        let feed = repo.get_feed(UID, None, Flavour::Consumer, &filters).await.unwrap();
        assert!(feed.items.is_empty());
        assert_eq!(defaults.seeded.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn concurrent_first_reads_seed_once() {
        let defaults = Arc::new(CountingDefaults::default());
        let repo = Arc::new(repository(defaults.clone()));

        let reads = (0..8).map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move {
                repo.get_feed(UID, None, Flavour::Consumer, &FeedFilters::default())
                    .await
                    .map(|feed| feed.actions.len())
            })
        });
        for read in reads.collect::<Vec<_>>() {
            assert_eq!(read.await.unwrap().unwrap(), 1);
        }
        assert_eq!(defaults.seeded.load(Ordering::SeqCst), 1);
        assert!(repo.init_locks.is_empty());
    }

    #[tokio::test]
    async fn init_locks_are_released_after_seeding() {
        let defaults = Arc::new(CountingDefaults::default());
        let repo = repository(defaults.clone());

        for n in 0..200 {
            let uid = format!("user-{n}");
            repo.get_feed(&uid, None, Flavour::Consumer, &FeedFilters::default())
                .await
                .unwrap();
            assert!(repo.init_locks.len() <= 1);
        }
        assert_eq!(defaults.seeded.load(Ordering::SeqCst), 200);
        assert!(repo.init_locks.is_empty());
    }

    #[test]
    fn init_lock_entry_stays_while_shared() {
        let locks = InitLocks::new();
        let first = InitLockEntry::acquire(&locks, UID, Flavour::Pro);
        let second = InitLockEntry::acquire(&locks, UID, Flavour::Pro);
        assert!(Arc::ptr_eq(&first.lock, &second.lock));

        drop(first);
        assert_eq!(locks.len(), 1);
        drop(second);
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn flavours_are_separate_feeds() {
        let defaults = Arc::new(CountingDefaults::default());
        let repo = repository(defaults.clone());

        repo.get_feed(UID, None, Flavour::Consumer, &FeedFilters::default()).await.unwrap();
        repo.get_feed(UID, None, Flavour::Pro, &FeedFilters::default()).await.unwrap();
        assert_eq!(defaults.seeded.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn cms_items_follow_stored_items_and_filters() {
        let mut cms_item = item("cms-1", false);
        cms_item.text_type = TextType::Html;
        let defaults = Arc::new(CountingDefaults {
            cms: vec![cms_item],
            ..Default::default()
        });
        let repo = repository(defaults);

        let feed = repo.get_feed(UID, None, Flavour::Consumer, &FeedFilters::default()).await.unwrap();
        let ids: Vec<_> = feed.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["welcome", "cms-1"]);

        let persistent = FeedFilters::default().persistent(BooleanFilter::True);
        let items = repo.get_items(UID, Flavour::Consumer, &persistent).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "welcome");
    }

    #[tokio::test]
    async fn items_carry_their_threads() {
        let repo = repository(Arc::default());
        repo.save_feed_item(UID, Flavour::Consumer, &item("i1", true)).await.unwrap();
        repo.post_message(UID, Flavour::Consumer, "i1", &message("m1")).await.unwrap();

        let found = repo.get_feed_item(UID, Flavour::Consumer, "i1").await.unwrap().unwrap();
        assert_eq!(found.conversations.len(), 1);
        assert!(repo.get_feed_item(UID, Flavour::Consumer, "missing").await.unwrap().is_none());

        repo.delete_message(UID, Flavour::Consumer, "i1", "m1").await.unwrap();
        assert!(repo.get_messages(UID, Flavour::Consumer, "i1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_saves_are_rejected_but_updates_pass() {
        let repo = repository(Arc::default());
        let mut it = item("i1", false);
        repo.save_feed_item(UID, Flavour::Consumer, &it).await.unwrap();

        let err = repo.save_feed_item(UID, Flavour::Consumer, &it).await.unwrap_err();
        assert!(err.is_duplicate());

        it.status = Status::Done;
        repo.update_feed_item(UID, Flavour::Consumer, &it).await.unwrap();
        let stored = repo.get_feed_item(UID, Flavour::Consumer, "i1").await.unwrap().unwrap();
        assert_eq!(stored.status, Status::Done);

        it.sequence_number = 2;
        repo.save_feed_item(UID, Flavour::Consumer, &it).await.unwrap();
    }

    #[tokio::test]
    async fn unread_count_tracks_persistent_items() {
        let repo = repository(Arc::default());
        assert_eq!(repo.unread_persistent_items(UID, Flavour::Pro).await.unwrap(), 0);

        repo.save_feed_item(UID, Flavour::Pro, &item("p1", true)).await.unwrap();
        repo.save_feed_item(UID, Flavour::Pro, &item("p2", true)).await.unwrap();
        repo.save_feed_item(UID, Flavour::Pro, &item("n1", false)).await.unwrap();
        repo.update_unread_persistent_items_count(UID, Flavour::Pro).await.unwrap();

        assert_eq!(repo.unread_persistent_items(UID, Flavour::Pro).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn empty_uid_fails_the_precondition() {
        let repo = repository(Arc::default());
        let err = repo.get_actions("", Flavour::Consumer).await.unwrap_err();
        assert!(matches!(err, FeedError::Precondition(_)));
    }
}
