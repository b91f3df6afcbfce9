use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A patient registered with the dental practice.
///
/// The identifier is assigned once at creation and never changes. Only the
/// name fields are mandatory; everything else is optional and omitted from
/// the JSON representation when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(rename = "patientId")]
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national_insurance_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(flatten)]
    pub address: Address,
    #[serde(flatten)]
    pub phones: Phones,
    #[serde(flatten)]
    pub emergency_contact: EmergencyContact,
    #[serde(flatten)]
    pub clinical: ClinicalDetails,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// Postal address of a patient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, rename = "addressLine1", skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    #[serde(default, rename = "addressLine2", skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Contact phone numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phones {
    #[serde(default, rename = "mobilePhone", skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, rename = "homePhone", skip_serializing_if = "Option::is_none")]
    pub home: Option<String>,
    #[serde(default, rename = "workPhone", skip_serializing_if = "Option::is_none")]
    pub work: Option<String>,
}

/// Person to contact in an emergency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    #[serde(
        default,
        rename = "emergencyContactFullName",
        skip_serializing_if = "Option::is_none"
    )]
    pub full_name: Option<String>,
    #[serde(
        default,
        rename = "emergencyContactPhone",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
    #[serde(
        default,
        rename = "emergencyContactRelationToPatient",
        skip_serializing_if = "Option::is_none"
    )]
    pub relation_to_patient: Option<String>,
}

/// Practice-facing metadata: assigned staff and demographics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethnicity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acquisition_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_dentist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_hygienist: Option<String>,
}

/// A denormalized, per-field copy of a patient's display attributes.
///
/// One entry exists per indexed name field. Entries are full copies taken at
/// write time, so a search can render results without loading the patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndexEntry {
    #[serde(rename = "patientId")]
    pub patient_id: Uuid,
    /// Lower-cased value of the indexed field.
    #[serde(skip)]
    pub search_text: String,
    #[serde(skip)]
    pub field: String,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_patient() -> Patient {
        let at = DateTime::parse_from_rfc3339("2024-03-01T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        Patient {
            id: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap(),
            title: Some("Mr".to_string()),
            first_name: "James".to_string(),
            middle_name: None,
            last_name: "Watt".to_string(),
            national_insurance_number: None,
            email: Some("j.watt@gmail.com".to_string()),
            gender: None,
            date_of_birth: Some("1736-01-19".to_string()),
            address: Address {
                post_code: Some("LS1 3LP".to_string()),
                ..Address::default()
            },
            phones: Phones {
                mobile: Some("07531247866".to_string()),
                ..Phones::default()
            },
            emergency_contact: EmergencyContact::default(),
            clinical: ClinicalDetails::default(),
            active: true,
            created_at: at,
            modified_at: at,
        }
    }

    #[test]
    fn test_patient_serializes_with_camel_case_names() {
        let json = serde_json::to_value(sample_patient()).unwrap();

        assert_eq!(json["patientId"], "550e8400-e29b-41d4-a716-446655440001");
        assert_eq!(json["firstName"], "James");
        assert_eq!(json["lastName"], "Watt");
        assert_eq!(json["postCode"], "LS1 3LP");
        assert_eq!(json["mobilePhone"], "07531247866");
        assert_eq!(json["active"], true);
    }

    #[test]
    fn test_patient_omits_absent_optional_fields() {
        let json = serde_json::to_value(sample_patient()).unwrap();

        assert!(json.get("middleName").is_none());
        assert!(json.get("addressLine1").is_none());
        assert!(json.get("emergencyContactFullName").is_none());
    }

    #[test]
    fn test_search_entry_hides_index_internals() {
        let entry = SearchIndexEntry {
            patient_id: Uuid::nil(),
            search_text: "james".to_string(),
            field: "first_name".to_string(),
            first_name: "James".to_string(),
            middle_name: None,
            last_name: "Watt".to_string(),
            date_of_birth: None,
            email: None,
            mobile_phone: None,
            post_code: None,
        };

        let json = serde_json::to_value(&entry).unwrap();

        assert!(json.get("searchText").is_none());
        assert!(json.get("field").is_none());
        assert_eq!(json["firstName"], "James");
    }
}
