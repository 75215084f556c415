use axum::Router;
use tower_http::cors::CorsLayer;

use crate::routes::{
    auth, children, contributors, gifts, health, investments, portfolio, profile,
    recurring_contributions, sprout_requests,
};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api/auth", auth::router())
        .nest("/api/profile", profile::router())
        .nest("/api/children", children::router())
        .nest("/api/portfolio", portfolio::router())
        .nest("/api/investments", investments::router())
        .nest("/api/gifts", gifts::router())
        .nest("/api/contributors", contributors::router())
        .nest("/api/sprout-requests", sprout_requests::router())
        .nest("/api/recurring-contributions", recurring_contributions::router())
        // The web client is served from a different origin.
        .layer(CorsLayer::permissive())
        .with_state(state)
}
