//! Route definitions for the `/gates` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::gates;
use crate::state::AppState;

/// Routes mounted at `/gates`.
///
/// ```text
/// GET    /    -> list
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(gates::list))
}
