//! Well-known role name constants carried in access-token claims.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STAFF: &str = "staff";
pub const ROLE_USER: &str = "user";

/// Returns `true` for roles that carry moderation privileges.
pub fn is_elevated(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_STAFF
}
