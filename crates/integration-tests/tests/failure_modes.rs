//! Feed reads when collaborators misbehave: flaky stores, failing CMS,
//! seeding that stops halfway.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use domains::{
    Action, CmsError, CmsPost, DefaultContent, Document, ElementKind, FeedError, FeedFilters, FeedRepository, Flavour,
    Item, MockCmsSource, MockDocumentStore, Nudge, Result, StoreError,
};
use integration_tests::memory_repository;
use services::default_content::catalog::DefaultAction;
use services::DefaultContentGenerator;
use storage_adapters::{CollectionLocator, DocumentFeedRepository};
use tokio_test::{assert_err, assert_ok};

fn cms_post(uuid: &str) -> CmsPost {
    CmsPost {
        uuid: uuid.into(),
        slug: "what-is-bewell".into(),
        excerpt: "Everything about Be.Well".into(),
        html: "<p>Be.Well</p>".into(),
        feature_image: None,
        updated_at: Utc::now(),
        published_at: Utc::now(),
    }
}

#[tokio::test]
async fn duplicated_snapshots_are_collapsed() {
    let action = DefaultAction::GetTest.build();
    let data = serde_json::to_value(&action).unwrap();
    let actions = CollectionLocator::default().elements("u1", Flavour::Consumer, ElementKind::Action);

    let mut store = MockDocumentStore::new();
    store.expect_query().returning(move |query| {
        if query.collection == actions {
            Ok(vec![
                Document::new(action.id.clone(), data.clone()),
                Document::new(action.id.clone(), data.clone()),
            ])
        } else {
            Ok(Vec::new())
        }
    });
    let repository = DocumentFeedRepository::new(
        Arc::new(store),
        CollectionLocator::default(),
        Arc::new(DefaultContentGenerator::new()),
    );

    let feed = repository
        .get_feed("u1", None, Flavour::Consumer, &FeedFilters::default())
        .await
        .unwrap();
    assert_eq!(feed.actions.len(), 1);
    assert!(feed.items.is_empty());
}

#[tokio::test]
async fn store_outages_surface_with_context() {
    let mut store = MockDocumentStore::new();
    store
        .expect_query()
        .returning(|_| Err(StoreError::Transport("connection reset".into())));
    let repository = DocumentFeedRepository::new(
        Arc::new(store),
        CollectionLocator::default(),
        Arc::new(DefaultContentGenerator::new()),
    );

    let err = repository
        .get_feed("u1", None, Flavour::Consumer, &FeedFilters::default())
        .await
        .unwrap_err();
    assert!(matches!(err.root(), FeedError::Store { .. }));
    assert!(err.to_string().starts_with("unable to get actions"));
}

#[tokio::test]
async fn cms_failure_is_not_fatal() {
    let mut cms = MockCmsSource::new();
    cms.expect_feed_content()
        .returning(|_| Err(CmsError::Request("503 Service Unavailable".into())));
    let (_, repository) = memory_repository(Arc::new(DefaultContentGenerator::with_cms(Arc::new(cms))));

    let feed = assert_ok!(
        repository
            .get_feed("u1", None, Flavour::Consumer, &FeedFilters::default())
            .await
    );
    assert_eq!(feed.items.len(), 1);
    assert!(feed.items[0].persistent);
}

#[tokio::test]
async fn cms_items_follow_stored_items() {
    let mut cms = MockCmsSource::new();
    cms.expect_feed_content()
        .returning(|_| Ok(vec![cms_post("cms-1")]));
    let (store, repository) = memory_repository(Arc::new(DefaultContentGenerator::with_cms(Arc::new(cms))));

    let feed = repository
        .get_feed("u1", None, Flavour::Consumer, &FeedFilters::default())
        .await
        .unwrap();
    assert_eq!(feed.items.len(), 2);
    assert!(feed.items[0].persistent);
    assert_eq!(feed.items[1].id, "cms-1");

    // CMS items are never written
    let items = CollectionLocator::default().elements("u1", Flavour::Consumer, ElementKind::Item);
    assert_eq!(store.document_count(&items), 1);

    // and pass through the same filters
    let persistent = FeedFilters::default().persistent(domains::BooleanFilter::True);
    let feed = repository
        .get_feed("u1", None, Flavour::Consumer, &persistent)
        .await
        .unwrap();
    assert_eq!(feed.items.len(), 1);
}

/// Seeds actions, then fails on nudges.
struct FailingNudges(DefaultContentGenerator);

#[async_trait]
impl DefaultContent for FailingNudges {
    async fn set_default_actions(&self, uid: &str, flavour: Flavour, repository: &dyn FeedRepository) -> Result<Vec<Action>> {
        self.0.set_default_actions(uid, flavour, repository).await
    }

    async fn set_default_nudges(&self, _: &str, _: Flavour, _: &dyn FeedRepository) -> Result<Vec<Nudge>> {
        Err(FeedError::store("save nudge", StoreError::Transport("deadline exceeded".into())))
    }

    async fn set_default_items(&self, uid: &str, flavour: Flavour, repository: &dyn FeedRepository) -> Result<Vec<Item>> {
        self.0.set_default_items(uid, flavour, repository).await
    }

    async fn cms_items(&self, _: Flavour) -> Vec<Item> {
        Vec::new()
    }
}

#[tokio::test]
async fn partial_seeding_is_kept() {
    let (store, repository) = memory_repository(Arc::new(FailingNudges(DefaultContentGenerator::new())));

    let err = assert_err!(
        repository
            .get_feed("u1", None, Flavour::Consumer, &FeedFilters::default())
            .await
    );
    assert!(err.to_string().starts_with("unable to initialize default feed"));

    let locator = CollectionLocator::default();
    assert_eq!(store.document_count(&locator.elements("u1", Flavour::Consumer, ElementKind::Action)), 4);
    assert_eq!(store.document_count(&locator.elements("u1", Flavour::Consumer, ElementKind::Nudge)), 0);

    // the feed is no longer empty, so the next read does not seed again
    let feed = repository
        .get_feed("u1", None, Flavour::Consumer, &FeedFilters::default())
        .await
        .unwrap();
    assert_eq!(feed.actions.len(), 4);
    assert!(feed.nudges.is_empty());
    assert!(feed.items.is_empty());
}

#[tokio::test]
async fn malformed_uids_fail_before_any_io() {
    let mut store = MockDocumentStore::new();
    store.expect_query().never();
    let repository = DocumentFeedRepository::new(
        Arc::new(store),
        CollectionLocator::default(),
        Arc::new(DefaultContentGenerator::new()),
    );

    for uid in ["", "u1/elements"] {
        let err = repository
            .get_feed(uid, None, Flavour::Consumer, &FeedFilters::default())
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::Precondition(_)), "{uid:?}");
    }
}
