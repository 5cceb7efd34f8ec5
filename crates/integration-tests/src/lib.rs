//! integration-tests/src/lib.rs
//!
//! Wiring shared by the cross-crate scenarios under `tests/`.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use configs::Settings;
use domains::{DefaultContent, DocumentStore};
use services::DefaultContentGenerator;
use storage_adapters::{CollectionLocator, DocumentFeedRepository, GhostCmsClient, MemoryDocumentStore};

/// Settings from built-in defaults, `config/feed.toml` if present and the
/// environment. No `.env` file is read.
pub fn default_settings() -> anyhow::Result<Settings> {
    Settings::load_from(Path::new(configs::DEFAULT_CONFIG_PATH)).context("unable to load settings")
}

/// Builds the default content generator the settings ask for, talking to
/// the configured CMS when there is one.
pub fn default_content(settings: &Settings) -> anyhow::Result<DefaultContentGenerator> {
    if !settings.cms_enabled() {
        return Ok(DefaultContentGenerator::new());
    }
    let (Some(endpoint), Some(api_key)) = (settings.cms.endpoint.as_deref(), settings.cms.api_key.clone()) else {
        return Ok(DefaultContentGenerator::new());
    };
    let client = GhostCmsClient::new(endpoint, api_key, settings.cms_timeout()).context("unable to build CMS client")?;
    Ok(DefaultContentGenerator::with_cms(Arc::new(client)))
}

pub fn build_repository(settings: &Settings, store: Arc<dyn DocumentStore>) -> anyhow::Result<DocumentFeedRepository> {
    let locator = CollectionLocator::new(settings.store.collection_suffix.as_deref());
    let defaults = default_content(settings)?;
    Ok(DocumentFeedRepository::new(store, locator, Arc::new(defaults)))
}

/// A repository over a fresh in-memory store, with the store handed back
/// for inspection.
pub fn memory_repository(defaults: Arc<dyn DefaultContent>) -> (Arc<MemoryDocumentStore>, DocumentFeedRepository) {
    let store = Arc::new(MemoryDocumentStore::new());
    let repository = DocumentFeedRepository::new(store.clone(), CollectionLocator::default(), defaults);
    (store, repository)
}
