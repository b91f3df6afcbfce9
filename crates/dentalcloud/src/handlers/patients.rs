//! Patient handlers.
//!
//! Thin HTTP adapters over [`PatientStore`](crate::storage::PatientStore):
//! request decoding and validation happen here, everything else in the store.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dentalcloud_core::patient::{
    validate_create_request, CreatePatientRequest, CreatePatientResponse, Patient,
    SearchIndexEntry,
};
use dentalcloud_core::storage::RepositoryError;

use crate::{
    handlers::{error::RequestError, AppError},
    state::AppState,
};

/// Query parameters for searching patients.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Name prefix to match, case-insensitive.
    pub search: Option<String>,
}

/// Response body of a reindex.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReindexResponse {
    pub patient_id: Uuid,
    pub entries_written: usize,
}

/// Create a new patient (POST /patients).
pub async fn create_patient(
    State(state): State<AppState>,
    payload: Result<Json<CreatePatientRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatePatientResponse>), AppError> {
    let Json(request) = payload.map_err(|rejection| match rejection {
        JsonRejection::MissingJsonContentType(_) => RequestError::UnsupportedMediaType,
        other => RequestError::InvalidBody(other.body_text()),
    })?;

    validate_create_request(&request)?;

    let patient_id = state.store.create(request).await?;

    Ok((StatusCode::CREATED, Json(CreatePatientResponse { patient_id })))
}

/// Get a single patient by ID (GET /patients/{id}).
///
/// An id that is not a UUID cannot name a stored patient, so it is reported
/// as not found.
pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Patient>, AppError> {
    let patient_id = Uuid::parse_str(&id).map_err(|_| RepositoryError::NotFound {
        entity_type: "Patient",
        id: id.clone(),
    })?;

    let patient = state.store.get(patient_id).await?;

    Ok(Json(patient))
}

/// Search patients by name prefix (GET /patients?search=term).
pub async fn search_patients(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<SearchIndexEntry>>, AppError> {
    let term = query.search.ok_or(RequestError::MissingSearchTerm)?;

    let entries = state.store.search(&term).await?;

    Ok(Json(entries))
}

/// Rebuild the search entries of a patient (POST /patients/{id}/reindex).
pub async fn reindex_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReindexResponse>, AppError> {
    let patient_id = Uuid::parse_str(&id).map_err(|_| RepositoryError::NotFound {
        entity_type: "Patient",
        id: id.clone(),
    })?;

    let entries_written = state.store.reindex(patient_id).await?;

    Ok(Json(ReindexResponse {
        patient_id,
        entries_written,
    }))
}
