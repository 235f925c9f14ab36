use crate::handlers;
use crate::middleware::{preflight, with_cors_headers};
use crate::state::AppState;
use axum::{
    middleware,
    routing::{any, get},
    Router,
};
use tower_http::trace::TraceLayer;

pub fn create_routes(state: AppState) -> Router {
    let router = Router::new()
        .route("/dns-query", any(handlers::dns_query))
        .route("/health", get(handlers::health_check))
        .route("/providers", get(handlers::get_providers))
        .fallback(handlers::invalid_endpoint)
        .layer(middleware::from_fn(preflight));

    with_cors_headers(router)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
