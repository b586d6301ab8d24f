use std::sync::Arc;

use salmon_core::grilse::ProbabilityStore;
use salmon_core::reference::ReferenceData;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Backing store for grilse probability tables.
    pub store: Arc<dyn ProbabilityStore>,
    /// Gates, species, methods and rivers, loaded at startup.
    pub reference: Arc<ReferenceData>,
}
