use std::sync::Arc;

use axum::{
    Router,
    extract::{FromRequest, FromRequestParts},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{AppState, error::AppError};

pub mod directors;
pub mod genres;
pub mod movies;

/// JSON body whose rejection is reported as [`AppError::Validation`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .merge(movies::router())
        .merge(directors::router())
        .merge(genres::router())
}

async fn health() -> &'static str {
    "ok"
}

/// `201 Created` with an empty body and the new item's path in `Location`.
fn created(location: String) -> Response {
    (StatusCode::CREATED, [(header::LOCATION, location)]).into_response()
}
