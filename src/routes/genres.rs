use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, response::Response, routing::get};

use super::{AppJson, AppPath, created};
use crate::{
    AppState,
    error::AppResult,
    schemas::{GenreOut, NamedChanges, NewNamed},
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/genres/", get(list).post(create))
        .route("/genres", get(list).post(create))
        .route("/genres/{id}", get(fetch).put(replace).delete(remove))
}

async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<GenreOut>>> {
    let rows = state.store.list_genres().await?;
    Ok(Json(rows.into_iter().map(GenreOut::from).collect()))
}

async fn create(
    State(state): State<Arc<AppState>>,
    AppJson(new): AppJson<NewNamed>,
) -> AppResult<Response> {
    let id = state.store.create_genre(new).await?;
    Ok(created(format!("/genres/{id}")))
}

async fn fetch(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<GenreOut>> {
    Ok(Json(state.store.get_genre(id).await?.into()))
}

async fn replace(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<i32>,
    AppJson(changes): AppJson<NamedChanges>,
) -> AppResult<StatusCode> {
    state.store.replace_genre(id, changes).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn remove(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<i32>,
) -> AppResult<StatusCode> {
    state.store.delete_genre(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
