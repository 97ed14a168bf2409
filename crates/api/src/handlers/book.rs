//! Handlers for the `/books` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use shelf_core::entities::{validate_category, validate_title};
use shelf_core::error::CoreError;
use shelf_core::types::DbId;
use shelf_db::models::book::{Book, CreateBook, UpdateBook};
use shelf_db::repositories::BookRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Book", id })
}

fn validate_create(input: &CreateBook) -> Result<(), CoreError> {
    validate_title(&input.title)?;
    validate_category(&input.category)
}

fn validate_update(input: &UpdateBook) -> Result<(), CoreError> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    if let Some(category) = &input.category {
        validate_category(category)?;
    }
    Ok(())
}

/// POST /api/books/
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    validate_create(&input)?;
    let book = BookRepo::create(&state.pool, &input).await?;
    tracing::info!(book_id = book.id, movie_id = ?book.movie_id, "Book created");
    Ok((StatusCode::CREATED, Json(book)))
}

/// GET /api/books/
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = BookRepo::list(&state.pool).await?;
    Ok(Json(books))
}

/// GET /api/books/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Book>> {
    let book = BookRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(book))
}

/// PUT /api/books/{id}/
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateBook>,
) -> AppResult<Json<Book>> {
    validate_create(&input)?;
    let book = BookRepo::replace(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(book))
}

/// PATCH /api/books/{id}/
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBook>,
) -> AppResult<Json<Book>> {
    validate_update(&input)?;
    let book = BookRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(book))
}

/// DELETE /api/books/{id}/
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if BookRepo::delete(&state.pool, id).await? {
        tracing::info!(book_id = id, "Book deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
