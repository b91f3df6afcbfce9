//! API request types for patient operations.
//!
//! Pure data types with no I/O. Empty strings sent by form-style clients are
//! normalized to `None` for the optional fields.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::serde::deserialize_optional_string;

/// Request payload for creating a new patient.
///
/// Unknown fields are rejected so that typos in client payloads surface as
/// errors instead of silently dropped data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreatePatientRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub title: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub national_insurance_number: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub date_of_birth: Option<String>,
    #[serde(
        default,
        rename = "addressLine1",
        deserialize_with = "deserialize_optional_string"
    )]
    pub address_line1: Option<String>,
    #[serde(
        default,
        rename = "addressLine2",
        deserialize_with = "deserialize_optional_string"
    )]
    pub address_line2: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub county: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub post_code: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub mobile_phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub home_phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub work_phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub emergency_contact_full_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub emergency_contact_phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub emergency_contact_relation_to_patient: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub ethnicity: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub occupation: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub acquisition_source: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub assigned_dentist: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub assigned_hygienist: Option<String>,
}

impl CreatePatientRequest {
    /// Create a new request with just a first name.
    pub fn new(first_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            ..Self::default()
        }
    }

    /// Set the last name.
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = last_name.into();
        self
    }

    /// Set the middle name.
    pub fn with_middle_name(mut self, middle_name: impl Into<String>) -> Self {
        self.middle_name = Some(middle_name.into());
        self
    }

    /// Set the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the date of birth.
    pub fn with_date_of_birth(mut self, date_of_birth: impl Into<String>) -> Self {
        self.date_of_birth = Some(date_of_birth.into());
        self
    }

    /// Set the mobile phone number.
    pub fn with_mobile_phone(mut self, mobile_phone: impl Into<String>) -> Self {
        self.mobile_phone = Some(mobile_phone.into());
        self
    }

    /// Set the post code.
    pub fn with_post_code(mut self, post_code: impl Into<String>) -> Self {
        self.post_code = Some(post_code.into());
        self
    }
}

/// Response body returned after a patient has been created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatientResponse {
    pub patient_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_request() {
        let request: CreatePatientRequest =
            serde_json::from_str(r#"{"firstName":"James"}"#).unwrap();

        assert_eq!(request, CreatePatientRequest::new("James"));
    }

    #[test]
    fn test_deserialize_treats_empty_strings_as_none() {
        let request: CreatePatientRequest = serde_json::from_str(
            r#"{"firstName":"James","lastName":"Watt","email":"","addressLine1":"  "}"#,
        )
        .unwrap();

        assert_eq!(request.last_name, "Watt");
        assert_eq!(request.email, None);
        assert_eq!(request.address_line1, None);
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let result: Result<CreatePatientRequest, _> =
            serde_json::from_str(r#"{"firstName":"James","favouriteColour":"blue"}"#);

        assert!(result.is_err());
    }

    #[test]
    fn test_response_uses_patient_id_key() {
        let response = CreatePatientResponse {
            patient_id: Uuid::nil(),
        };

        let json = serde_json::to_string(&response).unwrap();

        assert_eq!(
            json,
            r#"{"patientId":"00000000-0000-0000-0000-000000000000"}"#
        );
    }
}
