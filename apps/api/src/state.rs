use std::sync::Arc;

use crate::interview::InterviewService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Interview engine. Owns the session store and the text-generation backend.
    pub interviews: Arc<InterviewService>,
}
