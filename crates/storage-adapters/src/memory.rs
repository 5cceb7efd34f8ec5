//! In-process [`DocumentStore`] for tests and local runs.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;
use domains::{Document, DocumentStore, Query, StoreError};
use serde_json::Value;

/// Documents grouped by collection path. Each collection is locked as a
/// whole while it is read or written, which makes `create` atomic.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: DashMap<String, HashMap<String, Value>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document_count(&self, collection: &str) -> usize {
        self.collections.get(collection).map_or(0, |c| c.len())
    }
}

fn check_path(collection: &str, id: Option<&str>) -> Result<(), StoreError> {
    if collection.is_empty() || collection.split('/').any(str::is_empty) {
        return Err(StoreError::InvalidQuery(format!("malformed collection path {collection:?}")));
    }
    if let Some(id) = id {
        if id.is_empty() || id.contains('/') {
            return Err(StoreError::InvalidQuery(format!("malformed document id {id:?}")));
        }
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn query(&self, query: &Query) -> Result<Vec<Document>, StoreError> {
        check_path(&query.collection, None)?;
        let docs: Vec<Document> = match self.collections.get(&query.collection) {
            Some(coll) => coll
                .iter()
                .map(|(id, data)| Document::new(id.clone(), data.clone()))
                .collect(),
            None => return Ok(Vec::new()),
        };
        Ok(query.apply(docs))
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        check_path(collection, Some(id))?;
        Ok(self
            .collections
            .get(collection)
            .and_then(|coll| coll.get(id).map(|data| Document::new(id, data.clone()))))
    }

    async fn set(&self, collection: &str, id: &str, data: Value) -> Result<(), StoreError> {
        check_path(collection, Some(id))?;
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), data);
        Ok(())
    }

    async fn create(&self, collection: &str, id: &str, data: Value) -> Result<bool, StoreError> {
        check_path(collection, Some(id))?;
        let mut coll = self.collections.entry(collection.to_string()).or_default();
        match coll.entry(id.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(data);
                Ok(true)
            }
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        check_path(collection, Some(id))?;
        if let Some(mut coll) = self.collections.get_mut(collection) {
            coll.remove(id);
        }
        Ok(())
    }
}
