//! storage-adapters/src/lib.rs
//!
//! Persistence for user feeds: the collection layout, the query composer,
//! the element store and the `FeedRepository` built on them, plus the
//! document store and CMS adapters.

pub mod collections;
pub mod element_store;
pub mod feed_repository;
pub mod memory;
pub mod metadata;
pub mod query;

#[cfg(feature = "cms-ghost")]
pub mod cms;

pub use collections::CollectionLocator;
pub use element_store::ElementStore;
pub use feed_repository::DocumentFeedRepository;
pub use memory::MemoryDocumentStore;

#[cfg(feature = "cms-ghost")]
pub use cms::GhostCmsClient;
