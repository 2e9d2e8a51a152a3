use std::sync::Arc;

use crate::generation::generator::SequenceGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Stateless pipeline; the Arc only avoids cloning its collaborators per request.
    pub generator: Arc<SequenceGenerator>,
}
