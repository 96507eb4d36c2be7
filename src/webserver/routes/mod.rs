use crate::webserver::state::AppState;
use axum::Router;
use std::sync::Arc;

pub mod helius;
pub mod status;
pub mod tokens;

/// Routes live at the root, matching what deployed frontends call
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(status::routes())
        .merge(tokens::routes())
        .merge(helius::routes())
        .with_state(state)
}
