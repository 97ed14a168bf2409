//! Content-type registry and strongly typed comment targets.
//!
//! Comments point at their target through a `(content type, object pk)`
//! pair. At the HTTP boundary that pair arrives as loose strings; this module
//! resolves it against the registry loaded from the `content_types` table
//! and turns it into a [`CommentTarget`] over the closed set of commentable
//! [`EntityKind`]s. Everything past the boundary works with the typed form.

use std::fmt;

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// Application namespace that owns every commentable model.
pub const APP_LABEL: &str = "books_movies_api";

// ---------------------------------------------------------------------------
// Entity kinds
// ---------------------------------------------------------------------------

/// The closed set of entity kinds a comment may attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Book,
    Movie,
}

impl EntityKind {
    pub const ALL: [EntityKind; 2] = [EntityKind::Book, EntityKind::Movie];

    /// Model name as stored in `content_types.model`.
    pub fn model(self) -> &'static str {
        match self {
            EntityKind::Book => "book",
            EntityKind::Movie => "movie",
        }
    }

    pub fn app_label(self) -> &'static str {
        APP_LABEL
    }

    /// Human-readable entity name used in `NotFound` errors.
    pub fn entity_name(self) -> &'static str {
        match self {
            EntityKind::Book => "Book",
            EntityKind::Movie => "Movie",
        }
    }

    /// Look up a kind by its natural key. Model names are matched
    /// case-insensitively; the app label must match exactly.
    pub fn from_natural_key(app_label: &str, model: &str) -> Option<Self> {
        if app_label != APP_LABEL {
            return None;
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.model().eq_ignore_ascii_case(model))
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.app_label(), self.model())
    }
}

// ---------------------------------------------------------------------------
// Typed targets
// ---------------------------------------------------------------------------

/// A resolved comment target carrying a typed primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentTarget {
    Book(DbId),
    Movie(DbId),
}

impl CommentTarget {
    /// Parse an object key for the given kind.
    ///
    /// Keys are decimal, positive primary keys; surrounding whitespace is
    /// ignored.
    pub fn parse(kind: EntityKind, object_pk: &str) -> Result<Self, CoreError> {
        let id: DbId = object_pk.trim().parse().map_err(|_| {
            CoreError::InvalidTarget(format!(
                "object_pk '{object_pk}' is not a valid {} id",
                kind.model()
            ))
        })?;
        if id <= 0 {
            return Err(CoreError::InvalidTarget(format!(
                "object_pk must be positive, got {id}"
            )));
        }
        Ok(Self::new(kind, id))
    }

    pub fn new(kind: EntityKind, id: DbId) -> Self {
        match kind {
            EntityKind::Book => CommentTarget::Book(id),
            EntityKind::Movie => CommentTarget::Movie(id),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            CommentTarget::Book(_) => EntityKind::Book,
            CommentTarget::Movie(_) => EntityKind::Movie,
        }
    }

    pub fn id(&self) -> DbId {
        match *self {
            CommentTarget::Book(id) | CommentTarget::Movie(id) => id,
        }
    }

    /// The canonical string form stored in `comments.object_pk`.
    pub fn object_pk(&self) -> String {
        self.id().to_string()
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// A registered content type: the row id plus the kind it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentType {
    pub id: DbId,
    pub kind: EntityKind,
}

impl ContentType {
    /// `"app_label.model"` form used in comment payloads.
    pub fn label(&self) -> String {
        self.kind.to_string()
    }
}

/// Read-only lookup from natural keys and ids to registered content types.
///
/// Built once from the `content_types` table at startup. Rows whose model is
/// not a commentable [`EntityKind`] are skipped, so they stay unresolvable.
#[derive(Debug, Clone, Default)]
pub struct ContentTypeRegistry {
    entries: Vec<ContentType>,
}

impl ContentTypeRegistry {
    /// Build a registry from `(id, app_label, model)` rows.
    pub fn from_rows<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = (DbId, S, S)>,
        S: AsRef<str>,
    {
        let mut entries: Vec<ContentType> = Vec::new();
        for (id, app_label, model) in rows {
            let Some(kind) = EntityKind::from_natural_key(app_label.as_ref(), model.as_ref())
            else {
                continue;
            };
            if entries.iter().any(|e| e.kind == kind) {
                continue;
            }
            entries.push(ContentType { id, kind });
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn resolve(&self, app_label: &str, model: &str) -> Option<ContentType> {
        let kind = EntityKind::from_natural_key(app_label, model)?;
        self.for_kind(kind)
    }

    /// Resolve an `"app_label.model"` label.
    pub fn resolve_label(&self, label: &str) -> Option<ContentType> {
        let (app_label, model) = label.trim().split_once('.')?;
        self.resolve(app_label, model)
    }

    pub fn for_kind(&self, kind: EntityKind) -> Option<ContentType> {
        self.entries.iter().copied().find(|e| e.kind == kind)
    }

    pub fn by_id(&self, id: DbId) -> Option<ContentType> {
        self.entries.iter().copied().find(|e| e.id == id)
    }

    /// Resolve a `"app_label.model"` label plus object key into a typed target.
    pub fn resolve_target(
        &self,
        label: &str,
        object_pk: &str,
    ) -> Result<(ContentType, CommentTarget), CoreError> {
        let content_type = self.resolve_label(label).ok_or_else(|| {
            CoreError::InvalidTarget(format!(
                "Invalid content_type value: '{label}' is not a registered model"
            ))
        })?;
        let target = CommentTarget::parse(content_type.kind, object_pk)?;
        Ok((content_type, target))
    }
}
