//! HTTP Transport Tests

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use board_client::domain::entities::UploadFile;
use board_client::infrastructure::api::{FilesApi, UsersApi};
use board_client::infrastructure::http::{ApiRequest, Credentials, HttpTransport, QueryParams, Transport};
use board_client::infrastructure::storage::MemoryStore;
use board_client::shared::error::ClientError;

use crate::common::{test_user_json, TestClient};

#[tokio::test]
async fn test_get_sends_query_and_decodes_json() {
    let client = TestClient::new().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("page", "0"))
        .and(query_param("size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": [], "totalElements": 0 })))
        .expect(1)
        .mount(&client.server)
        .await;

    let body = client
        .transport
        .send(ApiRequest::get("/posts").query(QueryParams::paging(0, 10)))
        .await
        .unwrap();

    assert_eq!(body["totalElements"], json!(0));
}

#[tokio::test]
async fn test_bearer_token_attached_after_sign_in() {
    let client = TestClient::new().await;
    client.sign_in("secret-token");

    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("Authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": test_user_json("USER") })))
        .expect(1)
        .mount(&client.server)
        .await;

    let api = UsersApi::new(Arc::new(client.transport.clone()));
    let user = api.current_user().await.unwrap();

    assert_eq!(user.username, "testuser");
}

#[tokio::test]
async fn test_json_body_is_sent() {
    let client = TestClient::new().await;
    Mock::given(method("POST"))
        .and(path("/comments"))
        .and(body_json(json!({ "postId": 1, "content": "hi", "author": "kim" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 3, "content": "hi" })))
        .expect(1)
        .mount(&client.server)
        .await;

    let request = ApiRequest::post("/comments")
        .json(&json!({ "postId": 1, "content": "hi", "author": "kim" }))
        .unwrap();
    let body = client.transport.send(request).await.unwrap();

    assert_eq!(body["id"], json!(3));
}

#[test_case(400, Some("Title too long"), ClientError::BadRequest("Title too long".into()) ; "bad request keeps server message")]
#[test_case(404, None, ClientError::NotFound("Resource not found.".into()) ; "not found")]
#[test_case(409, Some("Username taken"), ClientError::Conflict("Username taken".into()) ; "conflict")]
#[test_case(403, None, ClientError::Forbidden("Access denied.".into()) ; "forbidden")]
#[test_case(502, None, ClientError::Server { status: 502, message: "Internal server error".into() } ; "bad gateway")]
#[tokio::test]
async fn test_error_status_mapping(status: u16, message: Option<&str>, expected: ClientError) {
    let client = TestClient::new().await;
    let body = message.map(|m| json!({ "message": m })).unwrap_or(Value::Null);
    Mock::given(method("GET"))
        .and(path("/posts/1"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&client.server)
        .await;

    let err = client.transport.send(ApiRequest::get("/posts/1")).await.unwrap_err();

    assert_eq!(err, expected);
}

#[tokio::test]
async fn test_unauthorized_clears_session() {
    let client = TestClient::new().await;
    client.sign_in("expired");

    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&client.server)
        .await;

    let err = client.transport.send(ApiRequest::get("/me")).await.unwrap_err();

    assert!(err.is_auth());
    assert!(!client.credentials.is_authenticated());
    assert!(client.storage.is_empty());
}

#[tokio::test]
async fn test_empty_and_plain_text_bodies() {
    let client = TestClient::new().await;
    Mock::given(method("DELETE"))
        .and(path("/posts/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&client.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/posts/2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Deleted"))
        .mount(&client.server)
        .await;

    let empty = client.transport.send(ApiRequest::delete("/posts/1")).await.unwrap();
    let text = client.transport.send(ApiRequest::delete("/posts/2")).await.unwrap();

    assert_eq!(empty, Value::Null);
    assert_eq!(text, json!("Deleted"));
}

#[tokio::test]
async fn test_multipart_upload() {
    let client = TestClient::new().await;
    Mock::given(method("POST"))
        .and(path("/files/upload/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1, "originalName": "notes.txt" }])))
        .expect(1)
        .mount(&client.server)
        .await;

    let api = FilesApi::new(Arc::new(client.transport.clone()));
    api.upload(7, vec![UploadFile::new("notes.txt", "text/plain", b"hello board".to_vec())])
        .await
        .unwrap();

    let requests = client.server.received_requests().await.unwrap();
    let upload = &requests[0];
    let content_type = upload.headers.get("content-type").unwrap().to_str().unwrap();
    let body = String::from_utf8_lossy(&upload.body);

    assert!(content_type.starts_with("multipart/form-data; boundary="));
    assert!(body.contains("name=\"files\""));
    assert!(body.contains("filename=\"notes.txt\""));
    assert!(body.contains("hello board"));
}

#[tokio::test]
async fn test_download_url_uses_base_url() {
    let client = TestClient::new().await;
    let api = FilesApi::new(Arc::new(client.transport.clone()));

    assert_eq!(
        api.download_url("abc_123.png"),
        format!("{}/files/download/abc_123.png", client.server.uri())
    );
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let credentials = Arc::new(Credentials::new(Arc::new(MemoryStore::new())));
    let transport = HttpTransport::new("http://127.0.0.1:9", Duration::from_secs(2), credentials).unwrap();

    let err = transport.send(ApiRequest::get("/posts")).await.unwrap_err();

    assert!(matches!(err, ClientError::Network(_)));
    assert!(err.user_message().contains("connection"));
}
