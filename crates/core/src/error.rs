use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The comment target does not resolve to a registered entity.
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// An anonymous submitter did not supply a display name and email.
    #[error("Missing identity: {0}")]
    MissingIdentity(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
