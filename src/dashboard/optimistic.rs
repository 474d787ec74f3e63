use crate::core::{Document, DocumentStore};
use crate::dashboard::records::{Record, TodoRecord};
use crate::utils::error::{EtlError, Result};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// Local copy of one collection that applies edits immediately and writes
/// them through to the document store.
///
/// When a remote write fails the local copy is thrown away and reloaded from
/// the store, then the write error is returned.
pub struct OptimisticList<T: Record> {
    store: Arc<dyn DocumentStore>,
    items: Vec<T>,
}

impl<T: Record> OptimisticList<T> {
    pub async fn load(store: Arc<dyn DocumentStore>) -> Result<Self> {
        let items = fetch_all(store.as_ref()).await?;
        Ok(Self { store, items })
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == Some(id))
    }

    /// Replaces the local copy with what the store holds.
    pub async fn resync(&mut self) -> Result<()> {
        self.items = fetch_all(self.store.as_ref()).await?;
        Ok(())
    }

    /// Assigns a fresh id, shows the record, then stores it.
    pub async fn add(&mut self, mut record: T) -> Result<T> {
        let id = Uuid::new_v4().to_string();
        record.set_id(id.clone());
        self.items.push(record.clone());
        T::sort(&mut self.items);

        let written = match to_document(&record) {
            Ok(doc) => self.store.put(T::COLLECTION, &id, &doc).await,
            Err(e) => Err(e),
        };
        self.settle(written).await?;
        Ok(record)
    }

    /// Applies `change` to the record with `id` and stores the result.
    pub async fn mutate(&mut self, id: &str, change: impl FnOnce(&mut T)) -> Result<()> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id() == Some(id))
            .ok_or_else(|| EtlError::NotFound(format!("{}/{}", T::COLLECTION, id)))?;
        change(item);
        let doc = to_document(item);
        T::sort(&mut self.items);

        let written = match doc {
            Ok(doc) => self.store.put(T::COLLECTION, id, &doc).await,
            Err(e) => Err(e),
        };
        self.settle(written).await
    }

    pub async fn remove(&mut self, id: &str) -> Result<()> {
        let before = self.items.len();
        self.items.retain(|item| item.id() != Some(id));
        if self.items.len() == before {
            return Err(EtlError::NotFound(format!("{}/{}", T::COLLECTION, id)));
        }

        let deleted = self.store.delete(T::COLLECTION, id).await;
        self.settle(deleted).await
    }

    async fn settle(&mut self, outcome: Result<()>) -> Result<()> {
        let Err(e) = outcome else {
            return Ok(());
        };
        tracing::warn!("{} write failed, resyncing: {}", T::COLLECTION, e);
        if let Err(resync) = self.resync().await {
            tracing::error!("{} resync failed: {}", T::COLLECTION, resync);
        }
        Err(e)
    }
}

impl OptimisticList<TodoRecord> {
    pub async fn complete(&mut self, id: &str) -> Result<()> {
        self.mutate(id, |todo| todo.completed = true).await
    }

    pub async fn toggle_priority(&mut self, id: &str) -> Result<()> {
        self.mutate(id, |todo| todo.is_high_priority = !todo.is_high_priority)
            .await
    }
}

async fn fetch_all<T: Record>(store: &dyn DocumentStore) -> Result<Vec<T>> {
    let mut items = store
        .list(T::COLLECTION)
        .await?
        .into_iter()
        .map(from_document)
        .collect::<Result<Vec<T>>>()?;
    T::sort(&mut items);
    Ok(items)
}

fn from_document<T: Record>(document: Document) -> Result<T> {
    let mut record: T = serde_json::from_value(document.data)?;
    record.set_id(document.id);
    Ok(record)
}

/// Document body without the `id`, which lives in the document key.
fn to_document<T: Record>(record: &T) -> Result<Value> {
    let mut value = serde_json::to_value(record)?;
    if let Value::Object(fields) = &mut value {
        fields.remove("id");
    }
    Ok(value)
}
