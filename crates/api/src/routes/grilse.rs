//! Route definitions for grilse probability tables.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::grilse;
use crate::state::AppState;

/// Routes mounted at `/reporting/grilse-probabilities`.
///
/// ```text
/// POST   /{season}/{gate}   -> upload   (?overwrite=true to replace)
/// GET    /{range}           -> export   (text/csv)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{season}/{gate}", post(grilse::upload))
        .route("/{range}", get(grilse::export))
}
