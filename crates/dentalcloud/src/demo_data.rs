use dentalcloud_core::patient::{validate_create_request, CreatePatientRequest};

use crate::storage::PatientStore;

/// Sample patients for local development.
pub fn demo_patients() -> Vec<CreatePatientRequest> {
    vec![
        CreatePatientRequest::new("Jamie")
            .with_last_name("Oliver")
            .with_email("j.oliver@gmail.com")
            .with_mobile_phone("07865154788")
            .with_post_code("LS18 9BQ")
            .with_date_of_birth("1975-05-27"),
        CreatePatientRequest::new("James")
            .with_last_name("Watt")
            .with_email("j.watt@gmail.com")
            .with_mobile_phone("07531247866")
            .with_post_code("LS1 3LP")
            .with_date_of_birth("1736-01-19"),
    ]
}

/// Creates the demo patients through the store. Returns how many were created.
pub async fn seed(store: &PatientStore) -> anyhow::Result<usize> {
    let patients = demo_patients();
    let count = patients.len();

    for request in patients {
        validate_create_request(&request)?;
        let patient_id = store.create(request).await?;
        tracing::debug!(patient_id = %patient_id, "Seeded demo patient");
    }

    tracing::info!(count, "Seeded demo patients");
    Ok(count)
}
