pub mod gates;
pub mod grilse;
pub mod health;
pub mod validation;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /gates                                           list gates
///
/// /reporting/grilse-probabilities/{season}/{gate}  upload table (POST, ?overwrite)
/// /reporting/grilse-probabilities/{range}          export as CSV (GET)
///
/// /activities/validate                             validate activity (POST, ?season)
/// /catches/validate                                validate catch (POST, ?season)
/// /small-catches/validate                          validate small catch (POST, ?season)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/gates", gates::router())
        .nest("/reporting/grilse-probabilities", grilse::router())
        .merge(validation::router())
}
