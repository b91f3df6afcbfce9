mod error;
mod operations;
mod requests;
mod types;

pub use error::PatientError;
pub use operations::{build_patient, build_search_entries, validate_create_request};
pub use requests::{CreatePatientRequest, CreatePatientResponse};
pub use types::{
    Address, ClinicalDetails, EmergencyContact, Patient, Phones, SearchIndexEntry,
};
