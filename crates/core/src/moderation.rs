//! Moderation gate: comment visibility and removal permission.
//!
//! Both checks are pure functions evaluated at request time. There is no
//! background sweep; an edit window simply stops matching once it elapses.

use crate::comments::CommentConfig;
use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// The caller attempting a moderation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// `None` for anonymous callers.
    pub user_id: Option<DbId>,
    /// Elevated (staff) privilege.
    pub is_staff: bool,
}

impl Actor {
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            is_staff: false,
        }
    }

    pub fn user(user_id: DbId) -> Self {
        Self {
            user_id: Some(user_id),
            is_staff: false,
        }
    }

    pub fn staff(user_id: DbId) -> Self {
        Self {
            user_id: Some(user_id),
            is_staff: true,
        }
    }
}

/// Outcome of a removal check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalDecision {
    AllowedAsStaff,
    AllowedAsOwner,
    DeniedNotOwner,
    DeniedWindowElapsed,
}

impl RemovalDecision {
    pub fn is_allowed(self) -> bool {
        matches!(
            self,
            RemovalDecision::AllowedAsStaff | RemovalDecision::AllowedAsOwner
        )
    }
}

/// Decide whether `actor` may remove a comment owned by `owner_id` and
/// submitted at `submitted_at`.
///
/// Staff may always remove. Otherwise the actor must be the registered
/// submitter and `now - submitted_at` must be strictly below the edit
/// window. Anonymous comments have no owner.
pub fn removal_decision(
    actor: &Actor,
    owner_id: Option<DbId>,
    submitted_at: Timestamp,
    now: Timestamp,
    config: &CommentConfig,
) -> RemovalDecision {
    if actor.is_staff {
        return RemovalDecision::AllowedAsStaff;
    }
    let is_owner = matches!((actor.user_id, owner_id), (Some(a), Some(o)) if a == o);
    if !is_owner {
        return RemovalDecision::DeniedNotOwner;
    }
    if now - submitted_at < config.edit_window() {
        RemovalDecision::AllowedAsOwner
    } else {
        RemovalDecision::DeniedWindowElapsed
    }
}

/// [`removal_decision`] as a `Result`, mapping denials to
/// [`CoreError::PermissionDenied`].
pub fn authorize_removal(
    actor: &Actor,
    owner_id: Option<DbId>,
    submitted_at: Timestamp,
    now: Timestamp,
    config: &CommentConfig,
) -> Result<RemovalDecision, CoreError> {
    let decision = removal_decision(actor, owner_id, submitted_at, now, config);
    match decision {
        RemovalDecision::DeniedNotOwner => Err(CoreError::PermissionDenied(
            "Only staff or the comment author can remove this comment".into(),
        )),
        RemovalDecision::DeniedWindowElapsed => Err(CoreError::PermissionDenied(format!(
            "Comments can only be removed by their author within {} seconds of posting",
            config.edit_window_secs
        ))),
        allowed => Ok(allowed),
    }
}

/// A comment is listed only while it is public and not removed.
pub fn is_visible(is_public: bool, is_removed: bool) -> bool {
    is_public && !is_removed
}
