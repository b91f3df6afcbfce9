//! Patient store: create, get and search on top of a `PatientRepository`.
//!
//! A patient occupies several items in the table: its primary record plus one
//! search entry per indexed name field. Those are independent backend writes
//! with no atomicity between them. Each write is retried on transient
//! failures; if the primary record lands but an index write still fails, the
//! caller gets `IndexIncomplete` and can repair the patient with
//! [`PatientStore::reindex`], which is idempotent.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use dentalcloud_core::patient::{
    build_patient, build_search_entries, CreatePatientRequest, Patient, SearchIndexEntry,
};
use dentalcloud_core::storage::keys::search_sort_key;
use dentalcloud_core::storage::{PatientRepository, RepositoryError, Result, RetryPolicy};

/// The sole reader and writer of patient records and their search entries.
pub struct PatientStore {
    repository: Arc<dyn PatientRepository>,
    retry: RetryPolicy,
}

impl PatientStore {
    /// Creates a store over the given backend.
    pub fn new(repository: Arc<dyn PatientRepository>, retry: RetryPolicy) -> Self {
        Self { repository, retry }
    }

    /// Creates a patient and its search entries, returning the new id.
    ///
    /// The request must already be validated. On success the primary record
    /// and every search entry exist.
    pub async fn create(&self, request: CreatePatientRequest) -> Result<Uuid> {
        let patient = build_patient(request, Uuid::new_v4(), Utc::now());
        let id = patient.id;

        if let Err(err) = self.put_patient(&patient).await {
            tracing::error!(patient_id = %id, error = %err, "Failed to write patient record");
            return Err(err);
        }

        if let Err(err) = self.write_search_entries(&patient).await {
            tracing::error!(
                patient_id = %id,
                error = %err,
                "Patient stored without a complete search index"
            );
            return Err(RepositoryError::IndexIncomplete {
                patient_id: id,
                reason: err.to_string(),
            });
        }

        tracing::info!(patient_id = %id, "Created patient");
        Ok(id)
    }

    /// Gets a patient by id.
    pub async fn get(&self, id: Uuid) -> Result<Patient> {
        let patient = self
            .with_retry("get_patient", |_| self.repository.get_patient(id))
            .await
            .inspect_err(|err| {
                tracing::error!(patient_id = %id, error = %err, "Failed to read patient record");
            })?;

        patient.ok_or_else(|| RepositoryError::NotFound {
            entity_type: "Patient",
            id: id.to_string(),
        })
    }

    /// Searches patients whose indexed names start with `term`, ignoring case.
    ///
    /// Returns one entry per matching field, so a patient whose first and last
    /// names both match appears twice.
    pub async fn search(&self, term: &str) -> Result<Vec<SearchIndexEntry>> {
        let prefix = search_sort_key(term);
        if prefix.trim().is_empty() {
            return Err(RepositoryError::InvalidData(
                "Search term cannot be empty".to_string(),
            ));
        }

        let entries = self
            .with_retry("search_entries", |_| {
                self.repository.search_entries(&prefix)
            })
            .await
            .inspect_err(|err| {
                tracing::error!(term = %prefix, error = %err, "Failed to search patients");
            })?;

        tracing::debug!(term = %prefix, results = entries.len(), "Searched patients");
        Ok(entries)
    }

    /// Rewrites every search entry of an existing patient from its primary
    /// record. Returns the number of entries written.
    pub async fn reindex(&self, id: Uuid) -> Result<usize> {
        let patient = self.get(id).await?;
        let written = self.write_search_entries(&patient).await?;

        tracing::info!(patient_id = %id, entries = written, "Reindexed patient");
        Ok(written)
    }

    async fn put_patient(&self, patient: &Patient) -> Result<()> {
        let repository = &self.repository;
        self.with_retry("put_patient", move |attempt| async move {
            match repository.put_patient(patient).await {
                // The id was generated for this call, so a conflict on a retry
                // is our own earlier write whose response got lost.
                Err(RepositoryError::AlreadyExists { .. }) if attempt > 1 => Ok(()),
                result => result,
            }
        })
        .await
    }

    /// Writes all search entries of a patient, returning how many were
    /// written. Keeps going after a failure and reports the first one.
    async fn write_search_entries(&self, patient: &Patient) -> Result<usize> {
        let entries = build_search_entries(patient);
        let mut first_error = None;

        for entry in &entries {
            let result = self
                .with_retry("put_search_entry", |_| {
                    self.repository.put_search_entry(entry)
                })
                .await;

            if let Err(err) = result {
                tracing::warn!(
                    patient_id = %patient.id,
                    field = %entry.field,
                    error = %err,
                    "Failed to write search entry"
                );
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(entries.len()),
        }
    }

    /// Runs `call` until it succeeds, fails permanently, or the retry policy
    /// is exhausted. `call` receives the 1-based attempt number.
    async fn with_retry<T, F, Fut>(&self, operation: &'static str, mut call: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1;
        loop {
            match call(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) if self.retry.should_retry(&err, attempt) => {
                    let delay = self.retry.delay_for_attempt(attempt);
                    tracing::warn!(
                        operation,
                        attempt,
                        delay = ?delay,
                        error = %err,
                        "Transient backend failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
