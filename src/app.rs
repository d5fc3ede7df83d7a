use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/calendar", get(handlers::calendar_page))
        .route("/plugin/:id", get(handlers::plugin_page))
        .route("/nav", get(handlers::navigate))
        .route("/api/deals", get(handlers::get_deals))
        .route("/api/deals/:id", get(handlers::get_deal))
        .route("/api/calendar", get(handlers::get_calendar))
        .with_state(state)
}
