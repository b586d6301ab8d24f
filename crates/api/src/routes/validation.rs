//! Route definitions for entity validation.

use axum::routing::post;
use axum::Router;

use crate::handlers::validation;
use crate::state::AppState;

/// Routes merged at the `/api/v1` root.
///
/// ```text
/// POST   /activities/validate      -> validate_activity
/// POST   /catches/validate         -> validate_catch
/// POST   /small-catches/validate   -> validate_small_catch
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/activities/validate", post(validation::validate_activity))
        .route("/catches/validate", post(validation::validate_catch))
        .route(
            "/small-catches/validate",
            post(validation::validate_small_catch),
        )
}
