pub mod rest;
pub mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use self::state::AppState;

// Re-export the handlers so the binary that builds the full server can reach
// them without spelling out the module path each time.
pub use rest::{
    analyze_preset_handler, get_item_handler, get_provenance_handler, list_categories_handler,
    list_contributions_handler, list_items_handler, list_presets_handler, mint_item_handler,
    submit_contribution_handler, verify_item_handler,
};

/// Builds the API router. Kept separate from the binary so integration tests
/// can drive the routes without binding a socket.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/items", get(list_items_handler))
        .route("/items/{id}", get(get_item_handler))
        .route("/items/{id}/verify", post(verify_item_handler))
        .route("/items/{id}/mint", post(mint_item_handler))
        .route("/items/{id}/provenance", get(get_provenance_handler))
        .route("/categories", get(list_categories_handler))
        .route("/presets", get(list_presets_handler))
        .route("/presets/{key}/analyze", post(analyze_preset_handler))
        .route(
            "/contributions",
            post(submit_contribution_handler).get(list_contributions_handler),
        )
        .with_state(app_state)
}
