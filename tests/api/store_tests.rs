//! Store Tests
//!
//! Stores driven end to end against a mock board server.

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use board_client::domain::entities::LoginRequest;
use board_client::infrastructure::http::ACCESS_TOKEN_KEY;
use board_client::infrastructure::storage::KeyValueStore;

use crate::common::{context_for, notice_json, post_json, test_user_json, USER_SERVICE_PREFIX};

async fn mount_json(server: &MockServer, verb: &str, route: &str, body: Value) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_posts_loads_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("page", "0"))
        .and(query_param("size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [post_json(1, "a"), post_json(2, "b"), post_json(3, "c")],
            "number": 0,
            "size": 10,
            "totalPages": 1,
            "totalElements": 3
        })))
        .expect(1)
        .mount(&server)
        .await;
    let (context, _) = context_for(&server);

    context.posts.fetch_posts(0, 10).await;

    let ids: Vec<i64> = context.posts.posts().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(context.posts.pagination().total_elements, 3);
    assert!(!context.posts.is_loading());
    assert_eq!(context.posts.error(), None);
}

#[test_case(post_json(7, "hello") ; "direct")]
#[test_case(json!({ "post": post_json(7, "hello"), "commentCount": 1, "comments": [{ "id": 1, "content": "hi" }] }) ; "wrapped")]
#[test_case(json!({ "data": { "post": post_json(7, "hello"), "commentCount": 1 } }) ; "data wrapped")]
#[tokio::test]
async fn test_fetch_post_normalizes_every_shape(body: Value) {
    let server = MockServer::start().await;
    mount_json(&server, "GET", "/posts/7", body).await;
    let (context, _) = context_for(&server);

    context.posts.fetch_post("7").await;

    let detail = context.posts.current().expect("detail should be loaded");
    assert_eq!(detail.entity.id, 7);
    assert_eq!(detail.entity.title, "hello");
    assert_eq!(context.posts.error(), None);
}

#[tokio::test]
async fn test_fetch_post_unknown_shape_sets_error() {
    let server = MockServer::start().await;
    mount_json(&server, "GET", "/posts/7", json!({ "message": "ok" })).await;
    let (context, _) = context_for(&server);

    context.posts.fetch_post("7").await;

    assert!(context.posts.current().is_none());
    assert_eq!(context.posts.error().as_deref(), Some("Unknown response format."));
}

#[tokio::test]
async fn test_fetch_post_not_found_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let (context, _) = context_for(&server);

    context.posts.fetch_post("99").await;

    assert_eq!(
        context.posts.error().as_deref(),
        Some("The requested item could not be found.")
    );
}

#[tokio::test]
async fn test_login_persists_session_and_authorizes_requests() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "POST",
        &format!("{}/login", USER_SERVICE_PREFIX),
        json!({ "data": {
            "accessToken": "access-1",
            "refreshToken": "refresh-1",
            "user": test_user_json("ADMIN")
        }}),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(header("Authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": [] })))
        .expect(1)
        .mount(&server)
        .await;
    let (context, storage) = context_for(&server);

    context
        .auth
        .login(&LoginRequest {
            username_or_email: "testuser".into(),
            password: "password123".into(),
        })
        .await
        .unwrap();
    context.posts.fetch_posts(0, 10).await;

    assert!(context.auth.is_logged_in());
    assert!(context.auth.is_admin());
    assert_eq!(storage.get(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("access-1"));
    assert_eq!(context.posts.error(), None);
}

#[tokio::test]
async fn test_rejected_token_logs_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/me", USER_SERVICE_PREFIX)))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let (context, storage) = context_for(&server);
    let user = serde_json::from_value(test_user_json("USER")).unwrap();
    context.credentials.establish("stale".into(), None, user);

    assert!(!context.auth.validate_token().await);
    assert!(!context.auth.is_logged_in());
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_main_page_notices_fill_free_slots() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "GET",
        "/notices/pinned",
        json!([notice_json(1, "p1", true), notice_json(2, "p2", true)]),
    )
    .await;
    mount_json(
        &server,
        "GET",
        "/notices/regular",
        json!((10..15).map(|id| notice_json(id, "r", false)).collect::<Vec<_>>()),
    )
    .await;
    let (context, _) = context_for(&server);

    let notices = context.notices.fetch_for_main_page().await;

    assert_eq!(notices.pinned.len(), 2);
    assert_eq!(notices.regular.len(), 3);
    assert_eq!(context.notices.pinned_count(), 2);
    assert_eq!(context.notices.regular_count(), 3);
}

#[tokio::test]
async fn test_main_page_failure_empties_both_lists() {
    let server = MockServer::start().await;
    mount_json(&server, "GET", "/notices/pinned", json!([notice_json(1, "p1", true)])).await;
    Mock::given(method("GET"))
        .and(path("/notices/regular"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let (context, _) = context_for(&server);

    let notices = context.notices.fetch_for_main_page().await;

    assert!(notices.pinned.is_empty());
    assert!(notices.regular.is_empty());
}

#[tokio::test]
async fn test_comments_follow_post() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "GET",
        "/comments/post/7",
        json!([{ "id": 1, "postId": 7, "content": "first", "author": "kim" }]),
    )
    .await;
    let (context, _) = context_for(&server);

    context.comments.fetch_comments(7).await;

    let comments = context.comments.comments();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].content, "first");
}
