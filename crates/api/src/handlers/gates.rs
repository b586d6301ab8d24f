use axum::extract::State;
use axum::Json;
use salmon_core::reference::ReferenceItem;

use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/gates
///
/// List every gate a probability table can be uploaded for, ordered by id.
pub async fn list(State(state): State<AppState>) -> Json<DataResponse<Vec<ReferenceItem>>> {
    let gates = state.reference.gates().cloned().collect();
    Json(DataResponse { data: gates })
}
