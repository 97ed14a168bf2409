//! Handlers for the `/movies` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use shelf_core::entities::validate_title;
use shelf_core::error::CoreError;
use shelf_core::types::DbId;
use shelf_db::models::book::Book;
use shelf_db::models::movie::{CreateMovie, Movie, UpdateMovie};
use shelf_db::repositories::{BookRepo, MovieRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Movie", id })
}

fn validate_create(input: &CreateMovie) -> Result<(), CoreError> {
    validate_title(&input.title)
}

fn validate_update(input: &UpdateMovie) -> Result<(), CoreError> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    Ok(())
}

/// POST /api/movies/
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateMovie>,
) -> AppResult<(StatusCode, Json<Movie>)> {
    validate_create(&input)?;
    let movie = MovieRepo::create(&state.pool, &input).await?;
    tracing::info!(movie_id = movie.id, "Movie created");
    Ok((StatusCode::CREATED, Json(movie)))
}

/// GET /api/movies/
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Movie>>> {
    let movies = MovieRepo::list(&state.pool).await?;
    Ok(Json(movies))
}

/// GET /api/movies/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Movie>> {
    let movie = MovieRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(movie))
}

/// PUT /api/movies/{id}/
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateMovie>,
) -> AppResult<Json<Movie>> {
    validate_create(&input)?;
    let movie = MovieRepo::replace(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(movie))
}

/// PATCH /api/movies/{id}/
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMovie>,
) -> AppResult<Json<Movie>> {
    validate_update(&input)?;
    let movie = MovieRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(movie))
}

/// DELETE /api/movies/{id}/
///
/// Books adapted from the movie survive with their `movie_id` cleared.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let detached = BookRepo::count_by_movie(&state.pool, id).await?;
    if MovieRepo::delete(&state.pool, id).await? {
        tracing::info!(movie_id = id, detached_books = detached, "Movie deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// GET /api/movies/{id}/books/
pub async fn list_books(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Book>>> {
    MovieRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let books = BookRepo::list_by_movie(&state.pool, id).await?;
    Ok(Json(books))
}
