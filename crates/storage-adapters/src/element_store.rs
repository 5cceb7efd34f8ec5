//! # Element Store
//!
//! Typed reads and guarded writes of feed elements over a [`DocumentStore`].

use std::collections::HashSet;
use std::sync::Arc;

use domains::{DocumentStore, Element, FeedError, Query, Result};
use tracing::debug;

use crate::query;

#[derive(Clone)]
pub struct ElementStore {
    store: Arc<dyn DocumentStore>,
}

impl ElementStore {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Runs `query` and decodes the results, keeping the first document seen
    /// for each ID. Store order decides which version wins.
    pub async fn list<E: Element>(&self, query: &Query) -> Result<Vec<E>> {
        let action = format!("get {}s", E::KIND);
        let docs = self
            .store
            .query(query)
            .await
            .map_err(|source| FeedError::store(action, source))?;

        let mut seen = HashSet::with_capacity(docs.len());
        let mut elements = Vec::with_capacity(docs.len());
        for doc in docs {
            let element: E = doc.data_to().map_err(|source| FeedError::Decode {
                kind: E::KIND,
                id: doc.id.clone(),
                source,
            })?;
            if seen.insert(element.id().to_string()) {
                elements.push(element);
            }
        }
        Ok(elements)
    }

    /// Latest version of the element with this ID, if any.
    pub async fn get<E: Element>(&self, collection: String, id: &str) -> Result<Option<E>> {
        let query = query::latest(collection, id);
        let docs = self
            .store
            .query(&query)
            .await
            .map_err(|source| FeedError::store(format!("get {} with ID {id}", E::KIND), source))?;

        docs.into_iter()
            .next()
            .map(|doc| {
                doc.data_to().map_err(|source| FeedError::Decode {
                    kind: E::KIND,
                    id: doc.id.clone(),
                    source,
                })
            })
            .transpose()
    }

    pub async fn exists(&self, collection: String, id: &str, sequence_number: i64) -> Result<bool> {
        let query = query::exact(collection, id, sequence_number);
        let docs = self
            .store
            .query(&query)
            .await
            .map_err(|source| FeedError::store("determine if the element exists", source))?;
        Ok(!docs.is_empty())
    }

    /// Validates, then upserts the element under its ID. With `is_new`, an
    /// existing document with the same ID and sequence number is rejected.
    pub async fn save<E: Element>(&self, collection: String, element: &E, is_new: bool) -> Result<()> {
        let doc = element.validate_and_marshal()?;

        if is_new && self.exists(collection.clone(), element.id(), element.sequence_number()).await? {
            return Err(FeedError::DuplicateElement {
                id: element.id().to_string(),
                sequence_number: element.sequence_number(),
            });
        }

        self.store
            .set(&collection, element.id(), doc)
            .await
            .map_err(|source| FeedError::store(format!("save {}", E::KIND), source))?;
        debug!(kind = %E::KIND, id = element.id(), %collection, "element saved");
        Ok(())
    }

    pub async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        self.store
            .delete(collection, id)
            .await
            .map_err(|source| FeedError::store(format!("delete {id}"), source))
    }
}
