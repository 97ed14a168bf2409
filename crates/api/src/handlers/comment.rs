//! Handlers for the `/comments` resource.
//!
//! Comments attach to any registered content type through
//! `(content_type, object_pk)`. Submission goes through
//! [`validate_submission`] and removal through the moderation gate in
//! [`shelf_core::moderation`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use shelf_core::comments::{validate_submission, CommentSubmission, ValidatedComment};
use shelf_core::error::CoreError;
use shelf_core::moderation::{authorize_removal, is_visible};
use shelf_core::types::DbId;
use shelf_db::models::comment::{Comment, CommentListParams, CommentResponse, NewComment};
use shelf_db::repositories::CommentRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Comment",
        id,
    })
}

/// Attach the `"app_label.model"` label to a stored comment.
fn to_response(state: &AppState, comment: Comment) -> AppResult<CommentResponse> {
    let content_type = state
        .content_types
        .by_id(comment.content_type_id)
        .ok_or_else(|| {
            AppError::InternalError(format!(
                "comment {} references unregistered content type {}",
                comment.id, comment.content_type_id
            ))
        })?;
    Ok(CommentResponse::from_comment(comment, content_type.label()))
}

/// Run the pure checks, then confirm the target row exists.
async fn validate(
    state: &AppState,
    auth: &OptionalAuthUser,
    submission: &CommentSubmission,
) -> AppResult<ValidatedComment> {
    let validated = validate_submission(
        &state.content_types,
        &state.config.comments,
        submission,
        &auth.submitter(),
    )?;

    if !CommentRepo::target_exists(&state.pool, validated.target).await? {
        return Err(AppError::Core(CoreError::InvalidTarget(format!(
            "No {} matches the given object_pk '{}'",
            validated.target.kind().entity_name(),
            validated.target.object_pk()
        ))));
    }
    Ok(validated)
}

/// GET /api/comments/?object_pk=..&content_type_model=..&app_label=..
///
/// Returns the visible comments on one target, oldest first. A missing
/// parameter or an unknown content type yields an empty list.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CommentListParams>,
) -> AppResult<Json<Vec<CommentResponse>>> {
    let Some((app_label, model, object_pk)) = params.target_key() else {
        return Ok(Json(Vec::new()));
    };
    let Some(content_type) = state.content_types.resolve(app_label, model) else {
        return Ok(Json(Vec::new()));
    };

    let comments = CommentRepo::list_for_target(
        &state.pool,
        content_type.id,
        object_pk,
        state.config.comments.site_id,
    )
    .await?;

    let label = content_type.label();
    let responses = comments
        .into_iter()
        .map(|c| CommentResponse::from_comment(c, label.clone()))
        .collect();
    Ok(Json(responses))
}

/// GET /api/comments/{id}/
///
/// Hidden comments are only shown to staff; everyone else gets 404.
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<CommentResponse>> {
    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if !is_visible(comment.is_public, comment.is_removed) && !auth.is_staff() {
        return Err(not_found(id));
    }
    Ok(Json(to_response(&state, comment)?))
}

/// POST /api/comments/
pub async fn create(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Json(submission): Json<CommentSubmission>,
) -> AppResult<(StatusCode, Json<CommentResponse>)> {
    let validated = validate(&state, &auth, &submission).await?;
    let comment = CommentRepo::create(&state.pool, &NewComment::from(&validated)).await?;

    tracing::info!(
        comment_id = comment.id,
        content_type = %validated.content_type.kind,
        object_pk = %comment.object_pk,
        user_id = ?comment.user_id,
        "Comment posted",
    );

    let response = CommentResponse::from_comment(comment, validated.content_type.label());
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/comments/preview/
///
/// Runs every submission check and renders the result without storing it.
pub async fn preview(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Json(submission): Json<CommentSubmission>,
) -> AppResult<Json<CommentResponse>> {
    let validated = validate(&state, &auth, &submission).await?;
    Ok(Json(CommentResponse::preview(&validated, chrono::Utc::now())))
}

/// DELETE /api/comments/{id}/
///
/// Soft-deletes the comment. Allowed for staff at any time and for the
/// registered author within the edit window. Repeating the call on an
/// already-removed comment still succeeds.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let decision = authorize_removal(
        &auth.actor(),
        comment.user_id,
        comment.submit_date,
        chrono::Utc::now(),
        &state.config.comments,
    )
    .inspect_err(|_| {
        tracing::warn!(comment_id = id, user_id = auth.user_id, "Comment removal denied");
    })?;

    if !CommentRepo::soft_delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(
        comment_id = id,
        user_id = auth.user_id,
        decision = ?decision,
        "Comment removed",
    );
    Ok(StatusCode::NO_CONTENT)
}
