//! Comment submission rules: configuration, submitter identity, and input
//! validation shared by the create and preview endpoints.

use serde::{Deserialize, Deserializer};
use validator::{ValidateEmail, ValidateUrl};

use crate::content_type::{CommentTarget, ContentType, ContentTypeRegistry};
use crate::error::CoreError;
use crate::types::DbId;

/// Default time after submission during which the author may remove a comment.
pub const DEFAULT_EDIT_WINDOW_SECS: i64 = 300;

/// Upper bound accepted for the edit window (one year).
pub const MAX_EDIT_WINDOW_SECS: i64 = 365 * 24 * 60 * 60;

/// Default maximum comment body length, in characters.
pub const DEFAULT_MAX_LENGTH: usize = 3000;

/// Default site identifier stamped on new comments.
pub const DEFAULT_SITE_ID: i32 = 1;

/// Maximum length of the submitter display name.
pub const MAX_USER_NAME_LENGTH: usize = 50;

/// Maximum length of the submitter email and URL.
pub const MAX_USER_CONTACT_LENGTH: usize = 254;

/// Settings for the comment store and the moderation gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentConfig {
    /// Seconds after `submit_date` during which the submitter may remove
    /// their own comment. The bound is exclusive.
    pub edit_window_secs: i64,
    /// Maximum body length in characters.
    pub max_length: usize,
    /// Site identifier written to and filtered on `comments.site_id`.
    pub site_id: i32,
}

impl Default for CommentConfig {
    fn default() -> Self {
        Self {
            edit_window_secs: DEFAULT_EDIT_WINDOW_SECS,
            max_length: DEFAULT_MAX_LENGTH,
            site_id: DEFAULT_SITE_ID,
        }
    }
}

impl CommentConfig {
    /// Reject settings the moderation gate cannot work with.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(0..=MAX_EDIT_WINDOW_SECS).contains(&self.edit_window_secs) {
            return Err(CoreError::Validation(format!(
                "edit window must be between 0 and {MAX_EDIT_WINDOW_SECS} seconds (got {})",
                self.edit_window_secs
            )));
        }
        if self.max_length == 0 {
            return Err(CoreError::Validation(
                "maximum comment length must be positive".into(),
            ));
        }
        Ok(())
    }

    /// The edit window as a duration, saturating instead of overflowing.
    pub fn edit_window(&self) -> chrono::Duration {
        chrono::Duration::try_seconds(self.edit_window_secs).unwrap_or(chrono::Duration::MAX)
    }
}

// ---------------------------------------------------------------------------
// Submission payload
// ---------------------------------------------------------------------------

/// Request body for creating or previewing a comment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentSubmission {
    /// Comment body.
    #[serde(default)]
    pub content: String,
    /// Target content type as `"app_label.model"`.
    #[serde(default)]
    pub content_type: String,
    /// Target primary key. JSON numbers are accepted and kept in string form.
    #[serde(default, deserialize_with = "object_pk_from_json")]
    pub object_pk: String,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub user_url: Option<String>,
}

fn object_pk_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Int(pk) => pk.to_string(),
    })
}

/// Who is submitting a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitter {
    /// A user identified by a verified access token.
    Registered {
        user_id: DbId,
        username: String,
        email: Option<String>,
    },
    Anonymous,
}

/// Resolved identity recorded on a comment row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitterIdentity {
    pub user_id: Option<DbId>,
    pub user_name: String,
    pub user_email: String,
}

/// A submission that passed every check that does not need the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedComment {
    pub content_type: ContentType,
    pub target: CommentTarget,
    pub comment: String,
    pub identity: SubmitterIdentity,
    pub user_url: Option<String>,
    pub site_id: i32,
}

/// Validate a submission against the registry and configuration.
///
/// Checks run in this order: target, identity, body, URL. The caller still
/// has to confirm the target row exists.
pub fn validate_submission(
    registry: &ContentTypeRegistry,
    config: &CommentConfig,
    submission: &CommentSubmission,
    submitter: &Submitter,
) -> Result<ValidatedComment, CoreError> {
    if submission.content_type.trim().is_empty() || submission.object_pk.trim().is_empty() {
        return Err(CoreError::InvalidTarget(
            "content_type and object_pk are both required".into(),
        ));
    }
    let (content_type, target) =
        registry.resolve_target(&submission.content_type, &submission.object_pk)?;

    let identity = resolve_identity(
        submitter,
        submission.user_name.as_deref(),
        submission.user_email.as_deref(),
    )?;

    let comment = validate_body(&submission.content, config.max_length)?;

    let user_url = non_blank(submission.user_url.as_deref()).map(str::to_string);
    if let Some(url) = &user_url {
        validate_url(url)?;
    }

    Ok(ValidatedComment {
        content_type,
        target,
        comment,
        identity,
        user_url,
        site_id: config.site_id,
    })
}

/// Work out the name and email recorded for a submitter.
///
/// Registered users fall back to their token identity when the payload
/// leaves a field blank. Anonymous submitters must supply both fields.
pub fn resolve_identity(
    submitter: &Submitter,
    user_name: Option<&str>,
    user_email: Option<&str>,
) -> Result<SubmitterIdentity, CoreError> {
    let name = non_blank(user_name);
    let email = non_blank(user_email);

    let identity = match submitter {
        Submitter::Registered {
            user_id,
            username,
            email: token_email,
        } => SubmitterIdentity {
            user_id: Some(*user_id),
            user_name: name.unwrap_or(username.as_str()).to_string(),
            user_email: email
                .or(token_email.as_deref())
                .unwrap_or_default()
                .to_string(),
        },
        Submitter::Anonymous => {
            let missing: Vec<&str> = [("user_name", name), ("user_email", email)]
                .into_iter()
                .filter(|(_, v)| v.is_none())
                .map(|(field, _)| field)
                .collect();
            if !missing.is_empty() {
                return Err(CoreError::MissingIdentity(format!(
                    "Anonymous comments require {}",
                    missing.join(" and ")
                )));
            }
            SubmitterIdentity {
                user_id: None,
                user_name: name.unwrap_or_default().to_string(),
                user_email: email.unwrap_or_default().to_string(),
            }
        }
    };

    if identity.user_name.chars().count() > MAX_USER_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "user_name must be at most {MAX_USER_NAME_LENGTH} characters"
        )));
    }
    if !identity.user_email.is_empty() {
        validate_email(&identity.user_email)?;
    }
    Ok(identity)
}

/// Trim the body and enforce the non-empty and length rules.
pub fn validate_body(content: &str, max_length: usize) -> Result<String, CoreError> {
    let body = content.trim();
    if body.is_empty() {
        return Err(CoreError::Validation("content must not be empty".into()));
    }
    let len = body.chars().count();
    if len > max_length {
        return Err(CoreError::Validation(format!(
            "content must be at most {max_length} characters (it has {len})"
        )));
    }
    Ok(body.to_string())
}

fn validate_email(email: &str) -> Result<(), CoreError> {
    // Bare hosts such as `a@localhost` are not accepted.
    let dotted_domain = email
        .rsplit_once('@')
        .is_some_and(|(_, domain)| domain.contains('.'));
    if email.len() <= MAX_USER_CONTACT_LENGTH && dotted_domain && email.validate_email() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )))
    }
}

fn validate_url(url: &str) -> Result<(), CoreError> {
    let has_scheme = url.starts_with("http://") || url.starts_with("https://");
    if !has_scheme || url.len() > MAX_USER_CONTACT_LENGTH || !url.validate_url() {
        return Err(CoreError::Validation(format!(
            "'{url}' is not a valid http(s) URL"
        )));
    }
    Ok(())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
