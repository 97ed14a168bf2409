//! Comment entity model and DTOs.

use serde::{Deserialize, Serialize};
use shelf_core::comments::ValidatedComment;
use shelf_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A comment row from the `comments` table.
///
/// The target is stored as `(content_type_id, object_pk)`; resolve it through
/// the content-type registry before use. Contains the submitter email, so do
/// not serialize this to API responses directly. Use [`CommentResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: DbId,
    pub content_type_id: DbId,
    pub object_pk: String,
    pub site_id: i32,
    pub user_id: Option<DbId>,
    pub user_name: String,
    pub user_email: String,
    pub user_url: Option<String>,
    pub comment: String,
    pub submit_date: Timestamp,
    pub is_public: bool,
    pub is_removed: bool,
}

/// Insert payload built from a validated submission.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub content_type_id: DbId,
    pub object_pk: String,
    pub site_id: i32,
    pub user_id: Option<DbId>,
    pub user_name: String,
    pub user_email: String,
    pub user_url: Option<String>,
    pub comment: String,
}

impl From<&ValidatedComment> for NewComment {
    fn from(v: &ValidatedComment) -> Self {
        Self {
            content_type_id: v.content_type.id,
            object_pk: v.target.object_pk(),
            site_id: v.site_id,
            user_id: v.identity.user_id,
            user_name: v.identity.user_name.clone(),
            user_email: v.identity.user_email.clone(),
            user_url: v.user_url.clone(),
            comment: v.comment.clone(),
        }
    }
}

/// Public representation of a comment.
///
/// `id` is `None` only for previews, which are never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: Option<DbId>,
    /// `"app_label.model"` of the target.
    pub content_type: String,
    pub object_pk: String,
    pub user_id: Option<DbId>,
    pub user_name: String,
    pub user_url: Option<String>,
    pub content: String,
    /// The stored `submit_date`.
    pub created_at: Timestamp,
    pub is_public: bool,
    pub is_removed: bool,
}

impl CommentResponse {
    pub fn from_comment(comment: Comment, content_type: String) -> Self {
        Self {
            id: Some(comment.id),
            content_type,
            object_pk: comment.object_pk,
            user_id: comment.user_id,
            user_name: comment.user_name,
            user_url: comment.user_url,
            content: comment.comment,
            created_at: comment.submit_date,
            is_public: comment.is_public,
            is_removed: comment.is_removed,
        }
    }

    /// Render a validated submission as it would look once stored.
    pub fn preview(validated: &ValidatedComment, created_at: Timestamp) -> Self {
        Self {
            id: None,
            content_type: validated.content_type.label(),
            object_pk: validated.target.object_pk(),
            user_id: validated.identity.user_id,
            user_name: validated.identity.user_name.clone(),
            user_url: validated.user_url.clone(),
            content: validated.comment.clone(),
            created_at,
            is_public: true,
            is_removed: false,
        }
    }
}

/// Query parameters for `GET /comments/`.
///
/// All three must be present for the list to return anything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentListParams {
    pub object_pk: Option<String>,
    pub content_type_model: Option<String>,
    pub app_label: Option<String>,
}

impl CommentListParams {
    /// Returns `(app_label, model, object_pk)` when every field is present
    /// and non-blank.
    pub fn target_key(&self) -> Option<(&str, &str, &str)> {
        fn field(v: &Option<String>) -> Option<&str> {
            v.as_deref().map(str::trim).filter(|s| !s.is_empty())
        }
        Some((
            field(&self.app_label)?,
            field(&self.content_type_model)?,
            field(&self.object_pk)?,
        ))
    }
}
