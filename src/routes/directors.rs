use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, response::Response, routing::get};

use super::{AppJson, AppPath, created};
use crate::{
    AppState,
    error::AppResult,
    schemas::{DirectorOut, NamedChanges, NewNamed},
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/directors/", get(list).post(create))
        .route("/directors", get(list).post(create))
        .route("/directors/{id}", get(fetch).put(replace).delete(remove))
}

async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<DirectorOut>>> {
    let rows = state.store.list_directors().await?;
    Ok(Json(rows.into_iter().map(DirectorOut::from).collect()))
}

async fn create(
    State(state): State<Arc<AppState>>,
    AppJson(new): AppJson<NewNamed>,
) -> AppResult<Response> {
    let id = state.store.create_director(new).await?;
    Ok(created(format!("/directors/{id}")))
}

async fn fetch(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<i32>,
) -> AppResult<Json<DirectorOut>> {
    Ok(Json(state.store.get_director(id).await?.into()))
}

async fn replace(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<i32>,
    AppJson(changes): AppJson<NamedChanges>,
) -> AppResult<StatusCode> {
    state.store.replace_director(id, changes).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn remove(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<i32>,
) -> AppResult<StatusCode> {
    state.store.delete_director(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
