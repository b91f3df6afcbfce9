use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::storage::keys::{search_sort_key, IndexedField};

use super::error::PatientError;
use super::requests::CreatePatientRequest;
use super::types::{Address, ClinicalDetails, EmergencyContact, Patient, Phones, SearchIndexEntry};

/// Validates a create request before it reaches the store.
pub fn validate_create_request(request: &CreatePatientRequest) -> Result<(), PatientError> {
    if request.first_name.trim().is_empty() {
        return Err(PatientError::EmptyFirstName);
    }
    Ok(())
}

/// Builds a new active patient from a create request.
///
/// `created_at` and `modified_at` are both set to `now`.
pub fn build_patient(request: CreatePatientRequest, id: Uuid, now: DateTime<Utc>) -> Patient {
    Patient {
        id,
        title: request.title,
        first_name: request.first_name.trim().to_string(),
        middle_name: request.middle_name,
        last_name: request.last_name.trim().to_string(),
        national_insurance_number: request.national_insurance_number,
        email: request.email,
        gender: request.gender,
        date_of_birth: request.date_of_birth,
        address: Address {
            line1: request.address_line1,
            line2: request.address_line2,
            city: request.city,
            county: request.county,
            post_code: request.post_code,
            country: request.country,
        },
        phones: Phones {
            mobile: request.mobile_phone,
            home: request.home_phone,
            work: request.work_phone,
        },
        emergency_contact: EmergencyContact {
            full_name: request.emergency_contact_full_name,
            phone: request.emergency_contact_phone,
            relation_to_patient: request.emergency_contact_relation_to_patient,
        },
        clinical: ClinicalDetails {
            ethnicity: request.ethnicity,
            occupation: request.occupation,
            acquisition_source: request.acquisition_source,
            assigned_dentist: request.assigned_dentist,
            assigned_hygienist: request.assigned_hygienist,
        },
        active: true,
        created_at: now,
        modified_at: now,
    }
}

/// Builds the search-index entries for a patient, one per indexed field.
///
/// Fields with an empty value are skipped: an empty string cannot be used as
/// an index sort key, and it would never match a non-empty search term.
/// Entries are returned in [`IndexedField::ALL`] order.
pub fn build_search_entries(patient: &Patient) -> Vec<SearchIndexEntry> {
    IndexedField::ALL
        .iter()
        .filter_map(|field| {
            let value = field.value_of(patient);
            if value.is_empty() {
                return None;
            }
            Some(SearchIndexEntry {
                patient_id: patient.id,
                search_text: search_sort_key(value),
                field: field.as_str().to_string(),
                first_name: patient.first_name.clone(),
                middle_name: patient.middle_name.clone(),
                last_name: patient.last_name.clone(),
                date_of_birth: patient.date_of_birth.clone(),
                email: patient.email.clone(),
                mobile_phone: patient.phones.mobile.clone(),
                post_code: patient.address.post_code.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-01T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn james_watt() -> Patient {
        let request = CreatePatientRequest::new("James")
            .with_last_name("Watt")
            .with_email("j.watt@gmail.com")
            .with_mobile_phone("07531247866")
            .with_post_code("LS1 3LP")
            .with_date_of_birth("1736-01-19");
        build_patient(request, Uuid::new_v4(), now())
    }

    #[test]
    fn test_validate_accepts_first_name_only() {
        assert_eq!(
            validate_create_request(&CreatePatientRequest::new("James")),
            Ok(())
        );
    }

    #[test]
    fn test_validate_rejects_blank_first_name() {
        assert_eq!(
            validate_create_request(&CreatePatientRequest::new("   ")),
            Err(PatientError::EmptyFirstName)
        );
        assert_eq!(
            validate_create_request(&CreatePatientRequest::default()),
            Err(PatientError::EmptyFirstName)
        );
    }

    #[test]
    fn test_validate_accepts_long_names() {
        let long = "a".repeat(250);

        assert_eq!(
            validate_create_request(&CreatePatientRequest::new(long.clone()).with_last_name(long)),
            Ok(())
        );
    }

    #[test]
    fn test_build_patient_is_active_with_timestamps() {
        let id = Uuid::new_v4();
        let patient = build_patient(CreatePatientRequest::new(" James "), id, now());

        assert_eq!(patient.id, id);
        assert_eq!(patient.first_name, "James");
        assert!(patient.active);
        assert_eq!(patient.created_at, now());
        assert_eq!(patient.modified_at, now());
    }

    #[test]
    fn test_build_patient_groups_nested_fields() {
        let patient = james_watt();

        assert_eq!(patient.address.post_code.as_deref(), Some("LS1 3LP"));
        assert_eq!(patient.phones.mobile.as_deref(), Some("07531247866"));
        assert_eq!(patient.phones.home, None);
    }

    #[test]
    fn test_build_search_entries_one_per_field() {
        let patient = james_watt();
        let entries = build_search_entries(&patient);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].field, "first_name");
        assert_eq!(entries[0].search_text, "james");
        assert_eq!(entries[1].field, "last_name");
        assert_eq!(entries[1].search_text, "watt");
    }

    #[test]
    fn test_build_search_entries_copies_display_attributes() {
        let patient = james_watt();

        for entry in build_search_entries(&patient) {
            assert_eq!(entry.patient_id, patient.id);
            assert_eq!(entry.first_name, "James");
            assert_eq!(entry.last_name, "Watt");
            assert_eq!(entry.email.as_deref(), Some("j.watt@gmail.com"));
            assert_eq!(entry.mobile_phone.as_deref(), Some("07531247866"));
            assert_eq!(entry.post_code.as_deref(), Some("LS1 3LP"));
            assert_eq!(entry.date_of_birth.as_deref(), Some("1736-01-19"));
        }
    }

    #[test]
    fn test_build_search_entries_skips_empty_last_name() {
        let patient = build_patient(CreatePatientRequest::new("Cher"), Uuid::new_v4(), now());
        let entries = build_search_entries(&patient);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].field, "first_name");
    }
}
