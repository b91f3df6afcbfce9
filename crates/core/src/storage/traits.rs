use async_trait::async_trait;
use uuid::Uuid;

use crate::patient::{Patient, SearchIndexEntry};

use super::Result;

/// Backend access to the single patients table.
///
/// Every method maps to one backend operation. Implementations address
/// items through [`super::keys`] and scope everything to [`super::keys::TENANT`];
/// callers never see partition or sort keys.
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Writes a primary patient record.
    ///
    /// Fails with `AlreadyExists` if a record with the same id is present.
    async fn put_patient(&self, patient: &Patient) -> Result<()>;

    /// Writes one search-index entry, overwriting any previous copy.
    async fn put_search_entry(&self, entry: &SearchIndexEntry) -> Result<()>;

    /// Gets a primary patient record by id.
    async fn get_patient(&self, id: Uuid) -> Result<Option<Patient>>;

    /// Gets every search-index entry whose search text starts with `prefix`.
    ///
    /// `prefix` is expected to be normalized already. Results are ordered by
    /// search text.
    async fn search_entries(&self, prefix: &str) -> Result<Vec<SearchIndexEntry>>;
}
