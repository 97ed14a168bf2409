//! HTTP-level integration tests for the comment endpoints.
//!
//! Tests cover submission (anonymous and registered), target resolution,
//! listing, preview, and the removal rules enforced by the moderation gate.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete, delete_auth, get, get_auth, post_json, post_json_auth, staff_token,
    user_token,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_book(pool: &PgPool) -> i64 {
    let app = common::build_test_app(pool.clone()).await;
    let response = post_json(
        app,
        "/api/books/",
        json!({"title": "Dune", "date": 1965, "category": "Science Fiction"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn create_movie(pool: &PgPool) -> i64 {
    let app = common::build_test_app(pool.clone()).await;
    let response = post_json(
        app,
        "/api/movies/",
        json!({"title": "Dune", "date": 2021, "budget": "165000000", "actors": "Zendaya"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

fn anonymous_comment(book_id: i64, content: &str) -> serde_json::Value {
    json!({
        "content": content,
        "content_type": "books_movies_api.book",
        "object_pk": book_id.to_string(),
        "user_name": "Ann",
        "user_email": "ann@example.com",
    })
}

/// Post a comment on a book as a registered user and return its id.
async fn post_as_user(pool: &PgPool, book_id: i64, user_id: i64) -> i64 {
    let app = common::build_test_app(pool.clone()).await;
    let response = post_json_auth(
        app,
        "/api/comments/",
        json!({
            "content": "Mine",
            "content_type": "books_movies_api.book",
            "object_pk": book_id.to_string(),
        }),
        &user_token(user_id, "reader"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn backdate(pool: &PgPool, comment_id: i64, secs: i64) {
    sqlx::query(
        "UPDATE comments SET submit_date = NOW() - make_interval(secs => $2) WHERE id = $1",
    )
    .bind(comment_id)
    .bind(secs as f64)
    .execute(pool)
    .await
    .unwrap();
}

async fn comment_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM comments")
        .fetch_one(pool)
        .await
        .unwrap()
}

fn list_uri(model: &str, object_pk: i64) -> String {
    format!(
        "/api/comments/?object_pk={object_pk}&content_type_model={model}&app_label=books_movies_api"
    )
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_anonymous_without_identity_is_rejected(pool: PgPool) {
    let book_id = create_book(&pool).await;

    let app = common::build_test_app(pool.clone()).await;
    let response = post_json(
        app,
        "/api/comments/",
        json!({
            "content": "Great book!",
            "content_type": "books_movies_api.book",
            "object_pk": book_id.to_string(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "MISSING_IDENTITY");
    assert_eq!(comment_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_anonymous_comment_is_created_and_listed(pool: PgPool) {
    let book_id = create_book(&pool).await;

    let app = common::build_test_app(pool.clone()).await;
    let response = post_json(app, "/api/comments/", anonymous_comment(book_id, "Great book!")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert!(created["id"].is_number());
    assert_eq!(created["content_type"], "books_movies_api.book");
    assert_eq!(created["object_pk"], book_id.to_string());
    assert_eq!(created["user_name"], "Ann");
    assert!(created["user_id"].is_null());
    assert_eq!(created["is_public"], true);
    assert_eq!(created["is_removed"], false);
    assert!(created["created_at"].is_string());
    assert!(created.get("submit_date").is_none());
    assert!(
        created.get("user_email").is_none(),
        "email must not be exposed"
    );

    let app = common::build_test_app(pool).await;
    let response = get(app, &list_uri("book", book_id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["content"], "Great book!");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_registered_comment_uses_token_identity(pool: PgPool) {
    let movie_id = create_movie(&pool).await;

    let app = common::build_test_app(pool).await;
    let response = post_json_auth(
        app,
        "/api/comments",
        json!({
            "content": "Loved the score",
            "content_type": "books_movies_api.movie",
            "object_pk": movie_id.to_string(),
        }),
        &user_token(7, "reader"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["user_id"], 7);
    assert_eq!(json["user_name"], "reader");
    assert_eq!(json["content_type"], "books_movies_api.movie");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_integer_object_pk_is_accepted(pool: PgPool) {
    let book_id = create_book(&pool).await;

    let app = common::build_test_app(pool.clone()).await;
    let response = post_json(
        app,
        "/api/comments/",
        json!({
            "content": "Numeric key",
            "content_type": "books_movies_api.book",
            "object_pk": book_id,
            "user_name": "Ann",
            "user_email": "ann@example.com",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["object_pk"], book_id.to_string());

    let app = common::build_test_app(pool).await;
    let listed = body_json(get(app, &list_uri("book", book_id)).await).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_email_and_url_are_rejected(pool: PgPool) {
    let book_id = create_book(&pool).await;

    let mut bad_email = anonymous_comment(book_id, "Hi");
    bad_email["user_email"] = json!("a@b..c");
    let mut bad_url = anonymous_comment(book_id, "Hi");
    bad_url["user_url"] = json!("http://exa mple.com");

    for body in [bad_email, bad_url] {
        let app = common::build_test_app(pool.clone()).await;
        let response = post_json(app, "/api/comments/", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
    assert_eq!(comment_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_content_type_is_invalid_target(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let response = post_json(
        app,
        "/api/comments/",
        json!({
            "content": "Hello",
            "content_type": "books_movies_api.author",
            "object_pk": "1",
            "user_name": "Ann",
            "user_email": "ann@example.com",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_TARGET");
    assert_eq!(comment_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_target_row_is_invalid_target(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;
    let response = post_json(app, "/api/comments/", anonymous_comment(999_999, "Anyone?")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_TARGET");
    assert_eq!(comment_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_content_is_rejected(pool: PgPool) {
    let book_id = create_book(&pool).await;

    let app = common::build_test_app(pool).await;
    let response = post_json(app, "/api/comments/", anonymous_comment(book_id, "   ")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_token_is_rejected_even_for_optional_auth(pool: PgPool) {
    let book_id = create_book(&pool).await;

    let app = common::build_test_app(pool).await;
    let response = post_json_auth(
        app,
        "/api/comments/",
        anonymous_comment(book_id, "Sneaky"),
        "not-a-real-token",
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Preview
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_preview_does_not_persist(pool: PgPool) {
    let book_id = create_book(&pool).await;

    let app = common::build_test_app(pool.clone()).await;
    let response = post_json(
        app,
        "/api/comments/preview/",
        anonymous_comment(book_id, "  Draft text  "),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["id"].is_null());
    assert_eq!(json["content"], "Draft text");
    assert_eq!(json["is_removed"], false);
    assert!(json["created_at"].is_string());
    assert_eq!(comment_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_preview_runs_identity_checks(pool: PgPool) {
    let book_id = create_book(&pool).await;

    let app = common::build_test_app(pool).await;
    let response = post_json(
        app,
        "/api/comments/preview",
        json!({
            "content": "Draft",
            "content_type": "books_movies_api.book",
            "object_pk": book_id.to_string(),
            "user_name": "Ann",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "MISSING_IDENTITY");
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_with_missing_params_is_empty(pool: PgPool) {
    let book_id = create_book(&pool).await;
    let app = common::build_test_app(pool.clone()).await;
    post_json(app, "/api/comments/", anonymous_comment(book_id, "Hi")).await;

    for uri in [
        "/api/comments/".to_string(),
        format!("/api/comments/?object_pk={book_id}&content_type_model=book"),
        format!("/api/comments/?object_pk={book_id}&content_type_model=author&app_label=books_movies_api"),
    ] {
        let app = common::build_test_app(pool.clone()).await;
        let response = get(app, &uri).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json.as_array().unwrap().is_empty(), "expected empty list for {uri}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_is_scoped_to_kind(pool: PgPool) {
    let book_id = create_book(&pool).await;
    let movie_id = create_movie(&pool).await;
    assert_eq!(book_id, movie_id, "both sequences start at 1");

    let app = common::build_test_app(pool.clone()).await;
    post_json(app, "/api/comments/", anonymous_comment(book_id, "On the book")).await;

    let app = common::build_test_app(pool).await;
    let response = get(app, &list_uri("movie", movie_id)).await;
    let json = body_json(response).await;
    assert!(json.as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Removal
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_requires_auth(pool: PgPool) {
    let book_id = create_book(&pool).await;
    let comment_id = post_as_user(&pool, book_id, 7).await;

    let app = common::build_test_app(pool).await;
    let response = delete(app, &format!("/api/comments/{comment_id}/")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_owner_removes_within_window(pool: PgPool) {
    let book_id = create_book(&pool).await;
    let comment_id = post_as_user(&pool, book_id, 7).await;
    backdate(&pool, comment_id, 299).await;

    let app = common::build_test_app(pool.clone()).await;
    let response = delete_auth(
        app,
        &format!("/api/comments/{comment_id}/"),
        &user_token(7, "reader"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone()).await;
    let response = get(app, &list_uri("book", book_id)).await;
    let json = body_json(response).await;
    assert!(json.as_array().unwrap().is_empty());

    let app = common::build_test_app(pool.clone()).await;
    let response = get(app, &format!("/api/comments/{comment_id}/")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool).await;
    let response = get_auth(app, &format!("/api/comments/{comment_id}/"), &staff_token(1)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["is_removed"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_owner_cannot_remove_after_window(pool: PgPool) {
    let book_id = create_book(&pool).await;
    let comment_id = post_as_user(&pool, book_id, 7).await;
    backdate(&pool, comment_id, 300).await;

    let app = common::build_test_app(pool.clone()).await;
    let response = delete_auth(
        app,
        &format!("/api/comments/{comment_id}/"),
        &user_token(7, "reader"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "PERMISSION_DENIED");

    let app = common::build_test_app(pool).await;
    let response = get(app, &list_uri("book", book_id)).await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_owner_cannot_remove(pool: PgPool) {
    let book_id = create_book(&pool).await;
    let comment_id = post_as_user(&pool, book_id, 7).await;

    let app = common::build_test_app(pool).await;
    let response = delete_auth(
        app,
        &format!("/api/comments/{comment_id}/"),
        &user_token(8, "stranger"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "PERMISSION_DENIED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_staff_removal_is_idempotent(pool: PgPool) {
    let book_id = create_book(&pool).await;
    let app = common::build_test_app(pool.clone()).await;
    let response = post_json(app, "/api/comments/", anonymous_comment(book_id, "Old news")).await;
    let comment_id = body_json(response).await["id"].as_i64().unwrap();
    backdate(&pool, comment_id, 86_400).await;

    for _ in 0..2 {
        let app = common::build_test_app(pool.clone()).await;
        let response = delete_auth(
            app,
            &format!("/api/comments/{comment_id}"),
            &staff_token(1),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let still_there: bool = sqlx::query_scalar("SELECT is_removed FROM comments WHERE id = $1")
        .bind(comment_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(still_there);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_missing_comment_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let response = delete_auth(app, "/api/comments/999999/", &staff_token(1)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_edit_window_comes_from_config(pool: PgPool) {
    let book_id = create_book(&pool).await;
    let comment_id = post_as_user(&pool, book_id, 7).await;

    let mut config = common::test_config();
    config.comments.edit_window_secs = 0;
    let app = common::build_test_app_with(pool, config).await;
    let response = delete_auth(
        app,
        &format!("/api/comments/{comment_id}/"),
        &user_token(7, "reader"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
