use crate::core::DocumentStore;
use crate::dashboard::records::{
    DOMAINS_COLLECTION, FAULTS_COLLECTION, GENERAL_COLLECTION, TODOS_COLLECTION,
};
use crate::utils::error::{EtlError, Result};
use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub const BACKUP_COLLECTIONS: [&str; 4] = [
    DOMAINS_COLLECTION,
    TODOS_COLLECTION,
    FAULTS_COLLECTION,
    GENERAL_COLLECTION,
];

/// `{collection: [{id, ..fields}]}` for every collection in `collections`.
pub async fn export_collections(store: &dyn DocumentStore, collections: &[&str]) -> Result<Value> {
    let mut backup = Map::new();
    for collection in collections {
        tracing::info!("Exporting {}...", collection);
        let documents = store.list(collection).await?;
        let rows: Vec<Value> = documents
            .into_iter()
            .map(|doc| {
                let mut row = Map::new();
                row.insert("id".to_string(), Value::String(doc.id));
                match doc.data {
                    Value::Object(fields) => row.extend(fields),
                    other => {
                        row.insert("data".to_string(), other);
                    }
                }
                Value::Object(row)
            })
            .collect();
        backup.insert(collection.to_string(), Value::Array(rows));
    }
    Ok(Value::Object(backup))
}

pub fn backup_file_name(date: NaiveDate) -> String {
    format!("firestore_backup_{}.json", date.format("%Y-%m-%d"))
}

/// Exports the dashboard collections into `dir` and returns the written path.
pub async fn write_backup(store: &dyn DocumentStore, dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    let backup = export_collections(store, &BACKUP_COLLECTIONS).await?;
    let path = dir.join(backup_file_name(date));
    let json = serde_json::to_string_pretty(&backup)?;
    tokio::fs::write(&path, json)
        .await
        .map_err(|e| EtlError::store(format!("writing {}: {}", path.display(), e)))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryDocumentStore;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_backup_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(backup_file_name(date), "firestore_backup_2026-03-07.json");
    }

    #[tokio::test]
    async fn test_write_backup_flattens_ids() {
        let store = MemoryDocumentStore::new();
        store
            .put("domains", "d1", &json!({"domainName": "alpha.sa"}))
            .await
            .unwrap();
        store.put("todos", "t1", &json!({"text": "renew"})).await.unwrap();

        let dir = TempDir::new().unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        let path = write_backup(&store, dir.path(), date).await.unwrap();

        let written: Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written["domains"], json!([{"id": "d1", "domainName": "alpha.sa"}]));
        assert_eq!(written["todos"][0]["text"], "renew");
        assert_eq!(written["faults"], json!([]));
        assert_eq!(written["general"], json!([]));
    }
}
