//! Key generation for the single-table layout.
//!
//! Pure functions for computing partition and sort keys. Primary patient
//! records and their search-index entries share one tenant partition so a
//! single secondary index, scoped by tenant, can serve name searches.
//!
//! | Item | `_pk` | `_sk` |
//! |---|---|---|
//! | Patient | `tenant#<tenant>` | `patient#<id>` |
//! | Search entry | `tenant#<tenant>` | `patient#<id>#<field>` |

use uuid::Uuid;

use crate::patient::Patient;

// ============================================================================
// Key prefixes
// ============================================================================

pub const TENANT_PREFIX: &str = "tenant#";
pub const PATIENT_PREFIX: &str = "patient#";

/// The single dental practice every record belongs to.
pub const TENANT: &str = "1";

/// A patient field that is copied into the search index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexedField {
    FirstName,
    LastName,
}

impl IndexedField {
    /// Every indexed field, in the order index entries are written.
    pub const ALL: [IndexedField; 2] = [IndexedField::FirstName, IndexedField::LastName];

    /// Name used as the sort key suffix of the index entry.
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexedField::FirstName => "first_name",
            IndexedField::LastName => "last_name",
        }
    }

    /// Parses a field name produced by [`IndexedField::as_str`].
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == s)
    }

    /// Selects this field's value from a patient.
    pub fn value_of<'a>(&self, patient: &'a Patient) -> &'a str {
        match self {
            IndexedField::FirstName => &patient.first_name,
            IndexedField::LastName => &patient.last_name,
        }
    }
}

/// Generate the partition key shared by every item of a tenant.
///
/// Pattern: `tenant#<tenant>`
pub fn tenant_pk(tenant: &str) -> String {
    format!("{TENANT_PREFIX}{tenant}")
}

/// Generate the primary key of a patient record.
///
/// Pattern: (`tenant#<tenant>`, `patient#<patient_id>`)
pub fn primary_key(tenant: &str, patient_id: Uuid) -> (String, String) {
    (tenant_pk(tenant), format!("{PATIENT_PREFIX}{patient_id}"))
}

/// Generate the primary key of a search-index entry.
///
/// Pattern: (`tenant#<tenant>`, `patient#<patient_id>#<field>`)
pub fn index_key(tenant: &str, patient_id: Uuid, field: &str) -> (String, String) {
    (
        tenant_pk(tenant),
        format!("{PATIENT_PREFIX}{patient_id}#{field}"),
    )
}

/// Normalize a value for the index sort key.
///
/// Applied both when writing index entries and when querying, which makes
/// prefix search case-insensitive.
pub fn search_sort_key(value: &str) -> String {
    value.to_lowercase()
}
