//! Route handlers.

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Multipart, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::pipeline::screen::ScreenKind;
use crate::pipeline::upload::PendingUpload;
use crate::pipeline::{acquire, align, screen};

use super::error::AppError;
use super::AppState;

pub async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    #[serde(default)]
    pub accession: String,
}

#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    #[serde(rename = "filePath")]
    pub file_path: String,
}

pub async fn download_genome(
    State(state): State<AppState>,
    body: Result<Json<DownloadRequest>, JsonRejection>,
) -> Result<Json<DownloadResponse>, AppError> {
    let request = extract_json(body)?;
    let artifact =
        acquire::fetch_genome(&state.store, &state.config.tools, &request.accession).await?;
    Ok(Json(DownloadResponse {
        file_path: artifact.rel_path,
    }))
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    #[serde(rename = "filePaths")]
    pub file_paths: Vec<String>,
}

/// Store every file field of the multipart body.
///
/// Files are handled in order; the first failing file aborts the batch with
/// an error response while everything stored before it stays in place.
pub async fn upload_sequences(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let mut multipart = multipart.map_err(|err| AppError::BadRequest(err.body_text()))?;
    let mut stored = Vec::new();
    let mut saw_file = false;
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(err.to_string()))?
    {
        let Some(name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        saw_file = true;
        let mut pending = PendingUpload::create(&state.store, &name).await?;
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|err| AppError::BadRequest(err.to_string()))?
        {
            pending.write_chunk(&chunk).await?;
        }
        let artifact = pending.finish(&state.store).await?;
        stored.push(artifact.rel_path);
    }
    if !saw_file {
        return Err(AppError::BadRequest("no files provided".to_string()));
    }
    Ok(Json(UploadResponse { file_paths: stored }))
}

#[derive(Debug, Deserialize)]
pub struct ScreenQuery {
    pub file: String,
}

#[derive(Debug, Serialize)]
pub struct VirulenceResponse {
    pub virulence: String,
}

pub async fn analyze_virulence(
    State(state): State<AppState>,
    query: Result<Query<ScreenQuery>, QueryRejection>,
) -> Result<Json<VirulenceResponse>, AppError> {
    let query = extract_query(query)?;
    let report = screen::run_screen(
        &state.store,
        &state.config.tools,
        ScreenKind::Virulence,
        &query.file,
    )
    .await?;
    Ok(Json(VirulenceResponse { virulence: report }))
}

#[derive(Debug, Serialize)]
pub struct ResistanceResponse {
    pub resistance: String,
}

pub async fn analyze_resistance(
    State(state): State<AppState>,
    query: Result<Query<ScreenQuery>, QueryRejection>,
) -> Result<Json<ResistanceResponse>, AppError> {
    let query = extract_query(query)?;
    let report = screen::run_screen(
        &state.store,
        &state.config.tools,
        ScreenKind::Resistance,
        &query.file,
    )
    .await?;
    Ok(Json(ResistanceResponse { resistance: report }))
}

#[derive(Debug, Deserialize)]
pub struct AlignmentRequest {
    #[serde(default)]
    pub files: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct NucmerResponse {
    pub nucmer: String,
}

pub async fn analyze_nucmer(
    State(state): State<AppState>,
    body: Result<Json<AlignmentRequest>, JsonRejection>,
) -> Result<Json<NucmerResponse>, AppError> {
    let request = extract_json(body)?;
    let report = align::nucmer_coords(&state.store, &state.config.tools, &request.files).await?;
    Ok(Json(NucmerResponse { nucmer: report }))
}

#[derive(Debug, Serialize)]
pub struct AlignmentResponse {
    pub alignment: String,
}

pub async fn analyze_alignment(
    State(state): State<AppState>,
    body: Result<Json<AlignmentRequest>, JsonRejection>,
) -> Result<Json<AlignmentResponse>, AppError> {
    let request = extract_json(body)?;
    let paf = align::whole_genome(&state.store, &state.config.tools, &request.files).await?;
    Ok(Json(AlignmentResponse { alignment: paf }))
}

/// Serve the CSV projection of the most recent whole-genome alignment.
pub async fn download_csv(State(state): State<AppState>) -> Result<Response, AppError> {
    let path = state.store.resolve(align::CSV_PATH)?;
    if !path.exists() {
        return Err(AppError::NotFound("CSV file does not exist".to_string()));
    }
    let body = tokio::fs::read(&path).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"alignment.csv\"",
            ),
        ],
        body,
    )
        .into_response())
}

fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

fn extract_query<T>(result: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    result
        .map(|Query(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}
