use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;

use super::{AppJson, AppPath, AppQuery, created};
use crate::{
    AppState,
    error::{AppError, AppResult},
    schemas::{MovieChanges, MovieOut, NewMovie},
    store::MovieFilter,
};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies/", get(list).post(create))
        .route("/movies", get(list).post(create))
        .route("/movies/{id}", get(fetch).put(replace).delete(remove))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    director_id: Option<String>,
    genre_id: Option<String>,
    #[serde(default)]
    expand: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ItemQuery {
    #[serde(default)]
    expand: bool,
}

/// An empty value counts as absent, so `?director_id=` lists every movie.
fn parse_id(name: &str, raw: Option<&str>) -> AppResult<Option<i32>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| AppError::Validation(format!("{name} must be an integer, got {s:?}"))),
    }
}

impl ListQuery {
    fn filter(&self) -> AppResult<MovieFilter> {
        Ok(MovieFilter {
            director_id: parse_id("director_id", self.director_id.as_deref())?,
            genre_id: parse_id("genre_id", self.genre_id.as_deref())?,
        })
    }
}

async fn list(
    State(state): State<Arc<AppState>>,
    AppQuery(q): AppQuery<ListQuery>,
) -> AppResult<Response> {
    let movies = state.store.list_movies(q.filter()?).await?;
    if q.expand {
        return Ok(Json(state.store.movies_with_names(movies).await?).into_response());
    }
    let out: Vec<MovieOut> = movies.into_iter().map(MovieOut::from).collect();
    Ok(Json(out).into_response())
}

async fn create(
    State(state): State<Arc<AppState>>,
    AppJson(new): AppJson<NewMovie>,
) -> AppResult<Response> {
    let id = state.store.create_movie(new).await?;
    Ok(created(format!("/movies/{id}")))
}

async fn fetch(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<i32>,
    AppQuery(q): AppQuery<ItemQuery>,
) -> AppResult<Response> {
    let movie = state.store.get_movie(id).await?;
    if q.expand {
        let mut detailed = state.store.movies_with_names(vec![movie]).await?;
        return match detailed.pop() {
            Some(detail) => Ok(Json(detail).into_response()),
            None => Err(AppError::NotFound { entity: "movie", id }),
        };
    }
    Ok(Json(MovieOut::from(movie)).into_response())
}

async fn replace(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<i32>,
    AppJson(changes): AppJson<MovieChanges>,
) -> AppResult<StatusCode> {
    state.store.replace_movie(id, changes).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn remove(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<i32>,
) -> AppResult<StatusCode> {
    state.store.delete_movie(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
