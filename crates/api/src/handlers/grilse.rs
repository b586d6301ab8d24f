//! Handlers for grilse probability tables: upload and CSV export.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use salmon_core::error::CoreError;
use salmon_core::grilse::export::export_csv;
use salmon_core::grilse::{commit_upload, ingest_table};
use salmon_core::range_filter::RangeFilter;
use salmon_core::types::DbId;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for an upload.
#[derive(Debug, Default, Deserialize)]
pub struct UploadParams {
    /// Replace an existing dataset for the same season and gate.
    #[serde(default)]
    pub overwrite: bool,
}

#[derive(Debug, Serialize)]
pub struct UploadSummary {
    pub season: i32,
    pub gate_id: DbId,
    /// Records stored by this upload.
    pub records: usize,
    /// Previously stored records this upload replaced.
    pub replaced: u64,
}

/// POST /api/v1/reporting/grilse-probabilities/{season}/{gate}?overwrite=bool
///
/// The request body is the probability table itself. Returns 201 with a
/// summary, 400 listing every table violation, 404 for an unknown gate, or
/// 409 when data already exists and `overwrite` was not set.
pub async fn upload(
    State(state): State<AppState>,
    Path((season, gate_id)): Path<(i32, DbId)>,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<DataResponse<UploadSummary>>)> {
    if state.reference.gate(gate_id).is_none() {
        return Err(CoreError::NotFound {
            entity: "Gate",
            id: gate_id,
        }
        .into());
    }

    let records = ingest_table(&body, season, gate_id)?;
    let outcome = commit_upload(
        state.store.as_ref(),
        season,
        gate_id,
        &records,
        params.overwrite,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UploadSummary {
                season: outcome.season,
                gate_id: outcome.gate_id,
                records: outcome.inserted,
                replaced: outcome.replaced,
            },
        }),
    ))
}

/// GET /api/v1/reporting/grilse-probabilities/{range}
///
/// Export every stored record whose season matches the range token as CSV.
pub async fn export(
    State(state): State<AppState>,
    Path(range): Path<String>,
) -> AppResult<(StatusCode, [(axum::http::header::HeaderName, &'static str); 1], String)> {
    let filter: RangeFilter = range.parse().map_err(CoreError::from)?;
    let records = state
        .store
        .find_in_seasons(filter.interval())
        .await
        .map_err(CoreError::from)?;
    tracing::debug!(range = %filter, records = records.len(), "Exporting grilse probabilities");

    let csv = export_csv(&records)?;
    Ok((
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/csv")],
        csv,
    ))
}
