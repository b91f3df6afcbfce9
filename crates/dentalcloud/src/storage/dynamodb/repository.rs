//! DynamoDB repository implementation.
//!
//! Implements `PatientRepository` from `dentalcloud_core::storage` using DynamoDB.

use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_sdk_dynamodb::operation::get_item::builders::GetItemFluentBuilder;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use uuid::Uuid;

use dentalcloud_core::patient::{Patient, SearchIndexEntry};
use dentalcloud_core::storage::keys::{self, TENANT};
use dentalcloud_core::storage::{PatientRepository, Result};

use crate::config::Config;

use super::conversions::{
    item_to_patient, item_to_search_entry, patient_to_item, search_entry_to_item, NAME_INDEX,
    PK, SEARCH_TEXT, SK,
};
use super::error::{map_get_item_error, map_put_item_error, map_query_error};

/// DynamoDB-based repository implementation.
///
/// Patients and their search entries live in one table under the tenant
/// partition.
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a new repository using the AWS SDK default credential chain
    /// and the table named in `config`.
    ///
    /// SDK-level retries are disabled; `PatientStore` retries transient
    /// failures according to `RETRY_MAX_ATTEMPTS`.
    pub async fn from_config(config: &Config) -> Self {
        let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .retry_config(sdk_retry_config())
            .load()
            .await;
        let client = Client::new(&aws_config);

        Self::new(client, config.table_name.clone())
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Strongly consistent read of a primary patient record.
    fn get_patient_request(&self, id: Uuid) -> GetItemFluentBuilder {
        let (pk, sk) = keys::primary_key(TENANT, id);

        self.client
            .get_item()
            .table_name(&self.table_name)
            .key(PK, AttributeValue::S(pk))
            .key(SK, AttributeValue::S(sk))
            .consistent_read(true)
    }
}

fn sdk_retry_config() -> RetryConfig {
    RetryConfig::disabled()
}

#[async_trait]
impl PatientRepository for DynamoDbRepository {
    async fn put_patient(&self, patient: &Patient) -> Result<()> {
        let item = patient_to_item(patient);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(#pk)")
            .expression_attribute_names("#pk", PK)
            .send()
            .await
            .map_err(|e| map_put_item_error(e, "Patient", patient.id.to_string()))?;

        Ok(())
    }

    async fn put_search_entry(&self, entry: &SearchIndexEntry) -> Result<()> {
        let item = search_entry_to_item(entry);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, "SearchIndexEntry", entry.patient_id.to_string()))?;

        Ok(())
    }

    async fn get_patient(&self, id: Uuid) -> Result<Option<Patient>> {
        let result = self
            .get_patient_request(id)
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_patient(&item)?)),
            None => Ok(None),
        }
    }

    async fn search_entries(&self, prefix: &str) -> Result<Vec<SearchIndexEntry>> {
        let mut entries = Vec::new();
        let mut start_key = None;

        loop {
            let result = self
                .client
                .query()
                .table_name(&self.table_name)
                .index_name(NAME_INDEX)
                .key_condition_expression("#pk = :pk AND begins_with(#st, :prefix)")
                .expression_attribute_names("#pk", PK)
                .expression_attribute_names("#st", SEARCH_TEXT)
                .expression_attribute_values(":pk", AttributeValue::S(keys::tenant_pk(TENANT)))
                .expression_attribute_values(":prefix", AttributeValue::S(prefix.to_string()))
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(map_query_error)?;

            for item in result.items.unwrap_or_default() {
                entries.push(item_to_search_entry(&item)?);
            }

            match result.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        tracing::debug!(prefix = %prefix, count = entries.len(), "Queried name index");

        Ok(entries)
    }
}
