//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use dentalcloud_core::patient::{Patient, SearchIndexEntry};
use dentalcloud_core::storage::keys::{self, TENANT};
use dentalcloud_core::storage::{PatientRepository, RepositoryError, Result};

/// Table address: (`_pk`, `_sk`).
type ItemKey = (String, String);

/// An item stored in the emulated table.
#[derive(Debug, Clone)]
enum StoredItem {
    Patient(Patient),
    SearchEntry(SearchIndexEntry),
}

/// In-memory storage backend for testing.
///
/// Items live in a `BTreeMap` ordered by (partition key, sort key) and wrapped
/// in `Arc<RwLock<_>>` for thread-safe access. Clones share the same table.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    items: Arc<RwLock<BTreeMap<ItemKey, StoredItem>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Number of search entries stored for a patient.
    #[cfg(test)]
    pub async fn search_entry_count(&self, patient_id: Uuid) -> usize {
        let items = self.items.read().await;
        items
            .values()
            .filter(|item| matches!(item, StoredItem::SearchEntry(e) if e.patient_id == patient_id))
            .count()
    }

    /// Number of items in the table, of any kind.
    #[cfg(test)]
    pub async fn item_count(&self) -> usize {
        self.items.read().await.len()
    }
}

#[async_trait]
impl PatientRepository for InMemoryRepository {
    async fn put_patient(&self, patient: &Patient) -> Result<()> {
        let key = keys::primary_key(TENANT, patient.id);
        let mut items = self.items.write().await;
        if items.contains_key(&key) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Patient",
                id: patient.id.to_string(),
            });
        }
        items.insert(key, StoredItem::Patient(patient.clone()));
        Ok(())
    }

    async fn put_search_entry(&self, entry: &SearchIndexEntry) -> Result<()> {
        let key = keys::index_key(TENANT, entry.patient_id, &entry.field);
        let mut items = self.items.write().await;
        items.insert(key, StoredItem::SearchEntry(entry.clone()));
        Ok(())
    }

    async fn get_patient(&self, id: Uuid) -> Result<Option<Patient>> {
        let key = keys::primary_key(TENANT, id);
        let items = self.items.read().await;
        match items.get(&key) {
            Some(StoredItem::Patient(patient)) => Ok(Some(patient.clone())),
            Some(StoredItem::SearchEntry(_)) => Err(RepositoryError::Decode(format!(
                "item at {} is not a patient",
                key.1
            ))),
            None => Ok(None),
        }
    }

    async fn search_entries(&self, prefix: &str) -> Result<Vec<SearchIndexEntry>> {
        let partition = keys::tenant_pk(TENANT);
        let items = self.items.read().await;

        let mut entries: Vec<SearchIndexEntry> = items
            .iter()
            .filter(|((pk, _), _)| *pk == partition)
            .filter_map(|(_, item)| match item {
                StoredItem::SearchEntry(entry) if entry.search_text.starts_with(prefix) => {
                    Some(entry.clone())
                }
                _ => None,
            })
            .collect();

        // Index order: by search text, ties in table order (stable sort).
        entries.sort_by(|a, b| a.search_text.cmp(&b.search_text));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use dentalcloud_core::patient::{build_patient, build_search_entries, CreatePatientRequest};

    fn patient(first: &str, last: &str) -> Patient {
        build_patient(
            CreatePatientRequest::new(first).with_last_name(last),
            Uuid::new_v4(),
            Utc::now(),
        )
    }

    async fn store(repo: &InMemoryRepository, patient: &Patient) {
        repo.put_patient(patient).await.unwrap();
        for entry in build_search_entries(patient) {
            repo.put_search_entry(&entry).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_put_and_get_patient() {
        let repo = InMemoryRepository::new();
        let patient = patient("James", "Watt");

        repo.put_patient(&patient).await.unwrap();

        assert_eq!(repo.get_patient(patient.id).await.unwrap(), Some(patient));
    }

    #[tokio::test]
    async fn test_get_missing_patient_returns_none() {
        let repo = InMemoryRepository::new();

        assert_eq!(repo.get_patient(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_patient_twice_fails() {
        let repo = InMemoryRepository::new();
        let patient = patient("James", "Watt");

        repo.put_patient(&patient).await.unwrap();
        let result = repo.put_patient(&patient).await;

        assert!(matches!(
            result,
            Err(RepositoryError::AlreadyExists {
                entity_type: "Patient",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_search_entries_live_beside_primary_record() {
        let repo = InMemoryRepository::new();
        let patient = patient("James", "Watt");

        store(&repo, &patient).await;

        assert_eq!(repo.item_count().await, 3);
        assert_eq!(repo.search_entry_count(patient.id).await, 2);
        assert!(repo.get_patient(patient.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_put_search_entry_overwrites() {
        let repo = InMemoryRepository::new();
        let patient = patient("James", "Watt");

        store(&repo, &patient).await;
        for entry in build_search_entries(&patient) {
            repo.put_search_entry(&entry).await.unwrap();
        }

        assert_eq!(repo.search_entry_count(patient.id).await, 2);
    }

    #[tokio::test]
    async fn test_search_entries_by_prefix_in_index_order() {
        let repo = InMemoryRepository::new();
        store(&repo, &patient("Jamie", "Oliver")).await;
        store(&repo, &patient("James", "Watt")).await;
        store(&repo, &patient("Ada", "Lovelace")).await;

        let entries = repo.search_entries("jam").await.unwrap();

        let texts: Vec<&str> = entries.iter().map(|e| e.search_text.as_str()).collect();
        assert_eq!(texts, vec!["james", "jamie"]);
    }

    #[tokio::test]
    async fn test_search_entries_no_match_is_empty() {
        let repo = InMemoryRepository::new();
        store(&repo, &patient("James", "Watt")).await;

        assert!(repo.search_entries("xyz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_the_same_table() {
        let repo = InMemoryRepository::new();
        let clone = repo.clone();
        let patient = patient("James", "Watt");

        repo.put_patient(&patient).await.unwrap();

        assert!(clone.get_patient(patient.id).await.unwrap().is_some());
    }
}
