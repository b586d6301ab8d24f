//! Dry-run validation of submitted catch-return entities.
//!
//! Each handler runs the entity's rule chain against the reference data held
//! in state and returns the normalized entity, or 400 with every violation.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;
use salmon_core::entities::{Activity, Catch, SmallCatch};
use salmon_core::error::CoreError;
use salmon_core::validation::activity::activity_validator;
use salmon_core::validation::catch::catch_validator;
use salmon_core::validation::small_catch::small_catch_validator;
use salmon_core::validation::EntityContext;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters shared by the validation endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ValidateParams {
    /// Season being submitted for. Defaults to the current year.
    pub season: Option<i32>,
}

fn context<'r>(state: &'r AppState, params: &ValidateParams) -> EntityContext<'r> {
    let today: NaiveDate = Utc::now().date_naive();
    let season = params.season.unwrap_or_else(|| today.year());
    EntityContext::new(&state.reference, season, today)
}

/// POST /api/v1/activities/validate?season=YYYY
pub async fn validate_activity(
    State(state): State<AppState>,
    Query(params): Query<ValidateParams>,
    Json(activity): Json<Activity>,
) -> AppResult<Json<DataResponse<Activity>>> {
    let mut ctx = context(&state, &params);
    let valid = activity_validator().is_valid(&activity, &mut ctx);
    ctx.finish(valid)?;
    Ok(Json(DataResponse { data: activity }))
}

/// POST /api/v1/catches/validate?season=YYYY
///
/// A valid catch is returned with both mass units filled in.
pub async fn validate_catch(
    State(state): State<AppState>,
    Query(params): Query<ValidateParams>,
    Json(mut catch): Json<Catch>,
) -> AppResult<Json<DataResponse<Catch>>> {
    let mut ctx = context(&state, &params);
    let valid = catch_validator().is_valid(&catch, &mut ctx);
    ctx.finish(valid)?;
    catch.mass.conciliate().map_err(CoreError::from)?;
    Ok(Json(DataResponse { data: catch }))
}

/// POST /api/v1/small-catches/validate?season=YYYY
pub async fn validate_small_catch(
    State(state): State<AppState>,
    Query(params): Query<ValidateParams>,
    Json(small_catch): Json<SmallCatch>,
) -> AppResult<Json<DataResponse<SmallCatch>>> {
    let mut ctx = context(&state, &params);
    let valid = small_catch_validator().is_valid(&small_catch, &mut ctx);
    ctx.finish(valid)?;
    Ok(Json(DataResponse { data: small_catch }))
}
