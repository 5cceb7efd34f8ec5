//! Per-user metadata documents: inbox labels and the unread persistent
//! items count. Both are created with defaults on first read.

use domains::{DocumentStore, FeedError, Result, StoreError, DEFAULT_LABEL};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::collections::{LABELS_DOC_ID, UNREAD_INBOX_COUNTS_DOC_ID};

#[derive(Debug, Serialize, Deserialize)]
struct Labels {
    labels: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct UnreadCount {
    count: i64,
}

pub async fn labels(store: &dyn DocumentStore, collection: &str) -> Result<Vec<String>> {
    let default = Labels {
        labels: vec![DEFAULT_LABEL.to_string()],
    };
    let doc = get_or_create(store, collection, LABELS_DOC_ID, default).await?;
    Ok(doc.labels)
}

/// Adds `label` to the user's labels unless it is already there.
pub async fn save_label(store: &dyn DocumentStore, collection: &str, label: &str) -> Result<()> {
    let mut labels = labels(store, collection).await?;
    if labels.iter().any(|l| l == label) {
        return Ok(());
    }
    labels.push(label.to_string());
    put(store, collection, LABELS_DOC_ID, &Labels { labels }).await
}

pub async fn unread_count(store: &dyn DocumentStore, collection: &str) -> Result<i64> {
    let doc = get_or_create(store, collection, UNREAD_INBOX_COUNTS_DOC_ID, UnreadCount { count: 0 }).await?;
    Ok(doc.count)
}

pub async fn set_unread_count(store: &dyn DocumentStore, collection: &str, count: i64) -> Result<()> {
    put(store, collection, UNREAD_INBOX_COUNTS_DOC_ID, &UnreadCount { count }).await
}

/// Reads the document, creating it from `default` when absent. A lost
/// creation race is settled by reading the winner's document once.
async fn get_or_create<T>(store: &dyn DocumentStore, collection: &str, id: &str, default: T) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    if let Some(value) = read(store, collection, id).await? {
        return Ok(value);
    }

    let data = serde_json::to_value(&default).map_err(|e| FeedError::store(format!("set default {id}"), e.into()))?;
    let created = store
        .create(collection, id, data)
        .await
        .map_err(|source| FeedError::store(format!("set default {id}"), source))?;
    if created {
        return Ok(default);
    }

    read(store, collection, id)
        .await?
        .ok_or_else(|| FeedError::MalformedMetadata(format!("{id} missing after creation")))
}

async fn read<T: DeserializeOwned>(store: &dyn DocumentStore, collection: &str, id: &str) -> Result<Option<T>> {
    let doc = store
        .get(collection, id)
        .await
        .map_err(|source| FeedError::store(format!("fetch {id}"), source))?;
    doc.map(|doc| {
        doc.data_to()
            .map_err(|e| FeedError::MalformedMetadata(format!("{id}: {e}")))
    })
    .transpose()
}

async fn put<T: Serialize>(store: &dyn DocumentStore, collection: &str, id: &str, value: &T) -> Result<()> {
    let data = serde_json::to_value(value).map_err(|e| FeedError::store(format!("save {id}"), StoreError::from(e)))?;
    store
        .set(collection, id, data)
        .await
        .map_err(|source| FeedError::store(format!("save {id}"), source))
}
