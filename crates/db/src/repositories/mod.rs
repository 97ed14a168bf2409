//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod book_repo;
pub mod comment_repo;
pub mod content_type_repo;
pub mod movie_repo;

pub use book_repo::BookRepo;
pub use comment_repo::CommentRepo;
pub use content_type_repo::ContentTypeRepo;
pub use movie_repo::MovieRepo;
