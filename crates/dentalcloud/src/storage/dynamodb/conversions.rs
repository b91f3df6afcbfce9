//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and domain types.
//! These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use dentalcloud_core::patient::{
    Address, ClinicalDetails, EmergencyContact, Patient, Phones, SearchIndexEntry,
};
use dentalcloud_core::storage::keys::{self, IndexedField, TENANT};
use dentalcloud_core::storage::RepositoryError;

// ============================================================================
// Table layout
// ============================================================================

pub const PK: &str = "_pk";
pub const SK: &str = "_sk";
pub const SEARCH_TEXT: &str = "st";
pub const NAME_INDEX: &str = "name-index";

pub const ENTITY_TYPE_PATIENT: &str = "patient";
pub const ENTITY_TYPE_SEARCH_ITEM: &str = "search-item";

/// Short attribute names shared by patient records and search items.
mod attr {
    pub const ENTITY_TYPE: &str = "et";
    pub const PATIENT_ID: &str = "pid";
    pub const FIELD: &str = "f";
    pub const TITLE: &str = "t";
    pub const FIRST_NAME: &str = "fn";
    pub const MIDDLE_NAME: &str = "mn";
    pub const LAST_NAME: &str = "ln";
    pub const NATIONAL_INSURANCE_NUMBER: &str = "ni";
    pub const EMAIL: &str = "e";
    pub const GENDER: &str = "g";
    pub const DATE_OF_BIRTH: &str = "dob";
    pub const ADDRESS_LINE_1: &str = "al1";
    pub const ADDRESS_LINE_2: &str = "al2";
    pub const CITY: &str = "ci";
    pub const COUNTY: &str = "co";
    pub const POST_CODE: &str = "pc";
    pub const COUNTRY: &str = "cn";
    pub const MOBILE_PHONE: &str = "mp";
    pub const HOME_PHONE: &str = "hp";
    pub const WORK_PHONE: &str = "wp";
    pub const EMERGENCY_CONTACT_NAME: &str = "ecn";
    pub const EMERGENCY_CONTACT_PHONE: &str = "ecp";
    pub const EMERGENCY_CONTACT_RELATION: &str = "ecr";
    pub const ETHNICITY: &str = "eth";
    pub const OCCUPATION: &str = "occ";
    pub const ACQUISITION_SOURCE: &str = "acq";
    pub const ASSIGNED_DENTIST: &str = "ad";
    pub const ASSIGNED_HYGIENIST: &str = "ah";
    pub const ACTIVE: &str = "a";
    pub const CREATED_AT: &str = "ca";
    pub const MODIFIED_AT: &str = "ma";
}

// ============================================================================
// Patient conversions
// ============================================================================

/// Convert a Patient to a DynamoDB item.
pub fn patient_to_item(patient: &Patient) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    // Keys
    let (pk, sk) = keys::primary_key(TENANT, patient.id);
    put_string(&mut item, PK, pk);
    put_string(&mut item, SK, sk);

    // Entity type
    put_string(&mut item, attr::ENTITY_TYPE, ENTITY_TYPE_PATIENT);

    // Data
    put_string(&mut item, attr::PATIENT_ID, patient.id.to_string());
    put_optional(&mut item, attr::TITLE, &patient.title);
    put_string(&mut item, attr::FIRST_NAME, &patient.first_name);
    put_optional(&mut item, attr::MIDDLE_NAME, &patient.middle_name);
    put_string(&mut item, attr::LAST_NAME, &patient.last_name);
    put_optional(
        &mut item,
        attr::NATIONAL_INSURANCE_NUMBER,
        &patient.national_insurance_number,
    );
    put_optional(&mut item, attr::EMAIL, &patient.email);
    put_optional(&mut item, attr::GENDER, &patient.gender);
    put_optional(&mut item, attr::DATE_OF_BIRTH, &patient.date_of_birth);

    let address = &patient.address;
    put_optional(&mut item, attr::ADDRESS_LINE_1, &address.line1);
    put_optional(&mut item, attr::ADDRESS_LINE_2, &address.line2);
    put_optional(&mut item, attr::CITY, &address.city);
    put_optional(&mut item, attr::COUNTY, &address.county);
    put_optional(&mut item, attr::POST_CODE, &address.post_code);
    put_optional(&mut item, attr::COUNTRY, &address.country);

    put_optional(&mut item, attr::MOBILE_PHONE, &patient.phones.mobile);
    put_optional(&mut item, attr::HOME_PHONE, &patient.phones.home);
    put_optional(&mut item, attr::WORK_PHONE, &patient.phones.work);

    let contact = &patient.emergency_contact;
    put_optional(&mut item, attr::EMERGENCY_CONTACT_NAME, &contact.full_name);
    put_optional(&mut item, attr::EMERGENCY_CONTACT_PHONE, &contact.phone);
    put_optional(
        &mut item,
        attr::EMERGENCY_CONTACT_RELATION,
        &contact.relation_to_patient,
    );

    let clinical = &patient.clinical;
    put_optional(&mut item, attr::ETHNICITY, &clinical.ethnicity);
    put_optional(&mut item, attr::OCCUPATION, &clinical.occupation);
    put_optional(&mut item, attr::ACQUISITION_SOURCE, &clinical.acquisition_source);
    put_optional(&mut item, attr::ASSIGNED_DENTIST, &clinical.assigned_dentist);
    put_optional(&mut item, attr::ASSIGNED_HYGIENIST, &clinical.assigned_hygienist);

    item.insert(attr::ACTIVE.to_string(), AttributeValue::Bool(patient.active));
    put_string(&mut item, attr::CREATED_AT, patient.created_at.to_rfc3339());
    put_string(&mut item, attr::MODIFIED_AT, patient.modified_at.to_rfc3339());

    item
}

/// Convert a DynamoDB item to Patient.
pub fn item_to_patient(item: &HashMap<String, AttributeValue>) -> Result<Patient, RepositoryError> {
    if let Some(entity_type) = get_optional_string(item, attr::ENTITY_TYPE) {
        if entity_type != ENTITY_TYPE_PATIENT {
            return Err(RepositoryError::Decode(format!(
                "Expected entity type {ENTITY_TYPE_PATIENT}, found {entity_type}"
            )));
        }
    }

    Ok(Patient {
        id: get_uuid(item, attr::PATIENT_ID)?,
        title: get_optional_string(item, attr::TITLE),
        first_name: get_string(item, attr::FIRST_NAME)?,
        middle_name: get_optional_string(item, attr::MIDDLE_NAME),
        last_name: get_optional_string(item, attr::LAST_NAME).unwrap_or_default(),
        national_insurance_number: get_optional_string(item, attr::NATIONAL_INSURANCE_NUMBER),
        email: get_optional_string(item, attr::EMAIL),
        gender: get_optional_string(item, attr::GENDER),
        date_of_birth: get_optional_string(item, attr::DATE_OF_BIRTH),
        address: Address {
            line1: get_optional_string(item, attr::ADDRESS_LINE_1),
            line2: get_optional_string(item, attr::ADDRESS_LINE_2),
            city: get_optional_string(item, attr::CITY),
            county: get_optional_string(item, attr::COUNTY),
            post_code: get_optional_string(item, attr::POST_CODE),
            country: get_optional_string(item, attr::COUNTRY),
        },
        phones: Phones {
            mobile: get_optional_string(item, attr::MOBILE_PHONE),
            home: get_optional_string(item, attr::HOME_PHONE),
            work: get_optional_string(item, attr::WORK_PHONE),
        },
        emergency_contact: EmergencyContact {
            full_name: get_optional_string(item, attr::EMERGENCY_CONTACT_NAME),
            phone: get_optional_string(item, attr::EMERGENCY_CONTACT_PHONE),
            relation_to_patient: get_optional_string(item, attr::EMERGENCY_CONTACT_RELATION),
        },
        clinical: ClinicalDetails {
            ethnicity: get_optional_string(item, attr::ETHNICITY),
            occupation: get_optional_string(item, attr::OCCUPATION),
            acquisition_source: get_optional_string(item, attr::ACQUISITION_SOURCE),
            assigned_dentist: get_optional_string(item, attr::ASSIGNED_DENTIST),
            assigned_hygienist: get_optional_string(item, attr::ASSIGNED_HYGIENIST),
        },
        active: get_bool(item, attr::ACTIVE)?,
        created_at: get_datetime(item, attr::CREATED_AT)?,
        modified_at: get_datetime(item, attr::MODIFIED_AT)?,
    })
}

// ============================================================================
// Search item conversions
// ============================================================================

/// Convert a SearchIndexEntry to a DynamoDB item.
pub fn search_entry_to_item(entry: &SearchIndexEntry) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    // Keys
    let (pk, sk) = keys::index_key(TENANT, entry.patient_id, &entry.field);
    put_string(&mut item, PK, pk);
    put_string(&mut item, SK, sk);
    put_string(&mut item, SEARCH_TEXT, &entry.search_text);

    // Entity type
    put_string(&mut item, attr::ENTITY_TYPE, ENTITY_TYPE_SEARCH_ITEM);

    // Data
    put_string(&mut item, attr::PATIENT_ID, entry.patient_id.to_string());
    put_string(&mut item, attr::FIELD, &entry.field);
    put_string(&mut item, attr::FIRST_NAME, &entry.first_name);
    put_optional(&mut item, attr::MIDDLE_NAME, &entry.middle_name);
    put_string(&mut item, attr::LAST_NAME, &entry.last_name);
    put_optional(&mut item, attr::DATE_OF_BIRTH, &entry.date_of_birth);
    put_optional(&mut item, attr::EMAIL, &entry.email);
    put_optional(&mut item, attr::MOBILE_PHONE, &entry.mobile_phone);
    put_optional(&mut item, attr::POST_CODE, &entry.post_code);

    item
}

/// Convert a DynamoDB item read through the name index to SearchIndexEntry.
///
/// The index projects only the display attributes and the keys, so the
/// indexed field is recovered from the `_sk` suffix.
pub fn item_to_search_entry(
    item: &HashMap<String, AttributeValue>,
) -> Result<SearchIndexEntry, RepositoryError> {
    let sort_key = get_string(item, SK)?;
    let field = sort_key
        .rsplit_once('#')
        .and_then(|(_, field)| IndexedField::parse(field))
        .ok_or_else(|| {
            RepositoryError::Decode(format!("Sort key is not a search item key: {sort_key}"))
        })?;

    Ok(SearchIndexEntry {
        patient_id: get_uuid(item, attr::PATIENT_ID)?,
        search_text: get_string(item, SEARCH_TEXT)?,
        field: field.as_str().to_string(),
        first_name: get_string(item, attr::FIRST_NAME)?,
        middle_name: get_optional_string(item, attr::MIDDLE_NAME),
        last_name: get_optional_string(item, attr::LAST_NAME).unwrap_or_default(),
        date_of_birth: get_optional_string(item, attr::DATE_OF_BIRTH),
        email: get_optional_string(item, attr::EMAIL),
        mobile_phone: get_optional_string(item, attr::MOBILE_PHONE),
        post_code: get_optional_string(item, attr::POST_CODE),
    })
}

// ============================================================================
// Helper functions
// ============================================================================

fn put_string(item: &mut HashMap<String, AttributeValue>, key: &str, value: impl Into<String>) {
    item.insert(key.to_string(), AttributeValue::S(value.into()));
}

/// Absent values are omitted from the item rather than stored as empty strings.
fn put_optional(item: &mut HashMap<String, AttributeValue>, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        put_string(item, key, value);
    }
}

/// Get a required string attribute.
fn get_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::Decode(format!("Missing or invalid field: {}", key)))
}

/// Get an optional string attribute.
fn get_optional_string(item: &HashMap<String, AttributeValue>, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

/// Get a required boolean attribute.
fn get_bool(item: &HashMap<String, AttributeValue>, key: &str) -> Result<bool, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_bool().ok())
        .copied()
        .ok_or_else(|| RepositoryError::Decode(format!("Missing or invalid field: {}", key)))
}

/// Get a required UUID attribute.
fn get_uuid(item: &HashMap<String, AttributeValue>, key: &str) -> Result<Uuid, RepositoryError> {
    let s = get_string(item, key)?;
    Uuid::parse_str(&s)
        .map_err(|e| RepositoryError::Decode(format!("Invalid UUID {}: {}", key, e)))
}

/// Get a required datetime attribute (RFC 3339 format).
fn get_datetime(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<DateTime<Utc>, RepositoryError> {
    let s = get_string(item, key)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Decode(format!("Invalid datetime {}: {}", key, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dentalcloud_core::patient::{build_patient, build_search_entries, CreatePatientRequest};

    fn sample_patient() -> Patient {
        let request = CreatePatientRequest::new("James")
            .with_last_name("Watt")
            .with_email("j.watt@gmail.com")
            .with_mobile_phone("07531247866")
            .with_post_code("LS1 3LP")
            .with_date_of_birth("1736-01-19");
        let created_at = DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        build_patient(
            request,
            Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap(),
            created_at,
        )
    }

    fn s(item: &HashMap<String, AttributeValue>, key: &str) -> String {
        item.get(key).unwrap().as_s().unwrap().clone()
    }

    #[test]
    fn test_patient_to_item_keys_and_markers() {
        let item = patient_to_item(&sample_patient());

        assert_eq!(s(&item, "_pk"), "tenant#1");
        assert_eq!(
            s(&item, "_sk"),
            "patient#550e8400-e29b-41d4-a716-446655440001"
        );
        assert_eq!(s(&item, "et"), "patient");
        assert_eq!(s(&item, "ca"), "2024-01-15T10:30:00+00:00");
        assert_eq!(item.get("a"), Some(&AttributeValue::Bool(true)));
        assert!(!item.contains_key("st"));
    }

    #[test]
    fn test_patient_to_item_omits_absent_fields() {
        let item = patient_to_item(&sample_patient());

        assert_eq!(s(&item, "fn"), "James");
        assert_eq!(s(&item, "pc"), "LS1 3LP");
        assert!(!item.contains_key("mn"));
        assert!(!item.contains_key("al1"));
        assert!(!item.contains_key("ecn"));
    }

    #[test]
    fn test_patient_item_round_trip() {
        let patient = sample_patient();

        let decoded = item_to_patient(&patient_to_item(&patient)).unwrap();

        assert_eq!(decoded, patient);
    }

    #[test]
    fn test_item_to_patient_missing_first_name_is_decode_error() {
        let mut item = patient_to_item(&sample_patient());
        item.remove("fn");

        let result = item_to_patient(&item);

        assert_eq!(
            result,
            Err(RepositoryError::Decode(
                "Missing or invalid field: fn".to_string()
            ))
        );
    }

    #[test]
    fn test_item_to_patient_rejects_wrong_type() {
        let mut item = patient_to_item(&sample_patient());
        item.insert("a".to_string(), AttributeValue::S("yes".to_string()));

        assert!(matches!(
            item_to_patient(&item),
            Err(RepositoryError::Decode(_))
        ));
    }

    #[test]
    fn test_item_to_patient_rejects_search_items() {
        let entry = build_search_entries(&sample_patient()).remove(0);

        assert!(matches!(
            item_to_patient(&search_entry_to_item(&entry)),
            Err(RepositoryError::Decode(_))
        ));
    }

    #[test]
    fn test_search_entry_to_item_layout() {
        let entries = build_search_entries(&sample_patient());
        let item = search_entry_to_item(&entries[1]);

        assert_eq!(s(&item, "_pk"), "tenant#1");
        assert_eq!(
            s(&item, "_sk"),
            "patient#550e8400-e29b-41d4-a716-446655440001#last_name"
        );
        assert_eq!(s(&item, "st"), "watt");
        assert_eq!(s(&item, "et"), "search-item");
        assert_eq!(s(&item, "pid"), "550e8400-e29b-41d4-a716-446655440001");
        assert_eq!(s(&item, "fn"), "James");
        assert_eq!(s(&item, "ln"), "Watt");
        assert_eq!(s(&item, "e"), "j.watt@gmail.com");
        assert_eq!(s(&item, "mp"), "07531247866");
        assert_eq!(s(&item, "dob"), "1736-01-19");
        assert_eq!(s(&item, "pc"), "LS1 3LP");
    }

    #[test]
    fn test_item_to_search_entry_from_index_projection() {
        let entry = build_search_entries(&sample_patient()).remove(0);
        let mut item = search_entry_to_item(&entry);
        // Attributes outside the index projection are not returned by a query.
        item.remove("et");
        item.remove("f");

        let decoded = item_to_search_entry(&item).unwrap();

        assert_eq!(decoded, entry);
        assert_eq!(decoded.field, "first_name");
    }

    #[test]
    fn test_item_to_search_entry_rejects_malformed_sort_key() {
        let mut item = search_entry_to_item(&build_search_entries(&sample_patient()).remove(0));
        item.insert("_sk".to_string(), AttributeValue::S("patient".to_string()));

        assert!(matches!(
            item_to_search_entry(&item),
            Err(RepositoryError::Decode(_))
        ));
    }

    #[test]
    fn test_item_to_search_entry_rejects_unknown_field() {
        let mut item = search_entry_to_item(&build_search_entries(&sample_patient()).remove(0));
        item.insert(
            "_sk".to_string(),
            AttributeValue::S("patient#550e8400-e29b-41d4-a716-446655440001#email".to_string()),
        );

        assert!(matches!(
            item_to_search_entry(&item),
            Err(RepositoryError::Decode(_))
        ));
    }
}
