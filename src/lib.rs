pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod routes;
pub mod schemas;
pub mod store;

use std::sync::Arc;

use axum::{Router, middleware::map_response_with_state};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{config::Config, store::Store};

pub struct AppState {
    pub config: Arc<Config>,
    pub store: Store,
}

pub fn app(state: Arc<AppState>) -> Router {
    let error_mode = state.config.error_mode;

    routes::router()
        .with_state(state)
        .layer(map_response_with_state(error_mode, error::legacy_errors))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any)),
        )
}
