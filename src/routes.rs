use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{FromRequestParts, Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, Uri, request::Parts},
    response::Redirect,
    routing::{any, get},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{DirectorView, GenreView, MovieFields, MovieQuery, MovieView},
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/movies", any(add_trailing_slash))
        .route("/director", any(add_trailing_slash))
        .route("/genre", any(add_trailing_slash))
        .route("/movies/", get(list_movies).post(create_movie))
        .route("/movies/{id}", get(get_movie).put(update_movie).delete(delete_movie))
        .route("/director/", get(list_directors))
        .route("/director/{id}", get(get_director))
        .route("/genre/", get(list_genres))
        .route("/genre/{id}", get(get_genre))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

/// Integer primary key taken from the path. Anything else is treated as an
/// unknown resource.
pub struct Id(pub i32);

impl<S: Send + Sync> FromRequestParts<S> for Id {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) =
            Path::<i32>::from_request_parts(parts, state).await.map_err(|_| AppError::NotFound)?;
        Ok(Self(id))
    }
}

/// Collection paths are served with a trailing slash only.
async fn add_trailing_slash(uri: Uri) -> Redirect {
    let target = match uri.query() {
        Some(q) => format!("{}/?{q}", uri.path()),
        None => format!("{}/", uri.path()),
    };
    Redirect::permanent(&target)
}

pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MovieQuery>,
) -> AppResult<Json<Vec<MovieView>>> {
    let Some(filter) = query.into_filter() else {
        return Ok(Json(Vec::new()));
    };
    let movies = state.store.list_movies(filter).await?;
    Ok(Json(movies.into_iter().map(MovieView::from).collect()))
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MovieFields>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(fields) = payload?;
    let id = state.store.create_movie(fields).await?;
    tracing::debug!(id, "created movie");
    Ok(StatusCode::CREATED)
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
) -> AppResult<Json<MovieView>> {
    let movie = state.store.get_movie(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(movie.into()))
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
    payload: Result<Json<MovieFields>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(changes) = payload?;
    if changes.is_empty() {
        return Err(AppError::BadRequest);
    }

    let updated = state.store.update_movie(id, changes).await?;
    if updated != 1 {
        return Err(AppError::BadRequest);
    }

    tracing::debug!(id, "updated movie");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
) -> AppResult<StatusCode> {
    if !state.store.delete_movie(id).await? {
        return Err(AppError::NotFound);
    }
    tracing::debug!(id, "deleted movie");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_directors(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<DirectorView>>> {
    let directors = state.store.list_directors().await?;
    Ok(Json(directors.into_iter().map(DirectorView::from).collect()))
}

pub async fn get_director(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
) -> AppResult<Json<DirectorView>> {
    let director = state.store.get_director(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(director.into()))
}

pub async fn list_genres(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<GenreView>>> {
    let genres = state.store.list_genres().await?;
    Ok(Json(genres.into_iter().map(GenreView::from).collect()))
}

pub async fn get_genre(
    State(state): State<Arc<AppState>>,
    Id(id): Id,
) -> AppResult<Json<GenreView>> {
    let genre = state.store.get_genre(id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(genre.into()))
}
