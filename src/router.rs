use axum::{Router, routing::get};

use crate::db::CalculationsStorage;
use crate::handlers::calculations::{clear_calculations, create_calculation, list_calculations};

/// Shared state for the calculations API.
#[derive(Clone)]
pub struct ReckonState {
    pub storage: CalculationsStorage,
}

impl ReckonState {
    pub fn new(storage: CalculationsStorage) -> Self {
        Self { storage }
    }
}

/// Build the axum router for the HTTP surface.
pub fn reckon_router(state: ReckonState) -> Router {
    Router::new()
        .route(
            "/api/calculations",
            get(list_calculations)
                .post(create_calculation)
                .delete(clear_calculations),
        )
        .with_state(state)
}
