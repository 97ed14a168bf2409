//! JWT-based authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use shelf_core::comments::Submitter;
use shelf_core::error::CoreError;
use shelf_core::moderation::Actor;
use shelf_core::roles::is_elevated;
use shelf_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's id in the identity provider (from `claims.sub`).
    pub user_id: DbId,
    /// The user's role name (e.g. `"staff"`, `"user"`).
    pub role: String,
    pub username: String,
    pub email: Option<String>,
}

impl AuthUser {
    /// Whether this user may moderate any comment.
    pub fn is_staff(&self) -> bool {
        is_elevated(&self.role)
    }

    pub fn actor(&self) -> Actor {
        Actor {
            user_id: Some(self.user_id),
            is_staff: self.is_staff(),
        }
    }

    pub fn submitter(&self) -> Submitter {
        Submitter::Registered {
            user_id: self.user_id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        authenticate(auth_header, state)
    }
}

/// Like [`AuthUser`], but a request without an `Authorization` header is
/// accepted as anonymous.
///
/// A header that is present but malformed or carries an invalid token is
/// still rejected with 401.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    pub fn submitter(&self) -> Submitter {
        self.0
            .as_ref()
            .map_or(Submitter::Anonymous, AuthUser::submitter)
    }

    pub fn is_staff(&self) -> bool {
        self.0.as_ref().is_some_and(AuthUser::is_staff)
    }
}

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get("authorization") else {
            return Ok(OptionalAuthUser(None));
        };
        let auth_header = header.to_str().map_err(|_| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization header".into(),
            ))
        })?;

        authenticate(auth_header, state).map(|user| OptionalAuthUser(Some(user)))
    }
}

fn authenticate(auth_header: &str, state: &AppState) -> Result<AuthUser, AppError> {
    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized(
            "Invalid Authorization format. Expected: Bearer <token>".into(),
        ))
    })?;

    let claims = validate_token(token, &state.config.jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
    })?;

    Ok(AuthUser {
        user_id: claims.sub,
        role: claims.role,
        username: claims.username,
        email: claims.email,
    })
}
