//! Session Storage Tests

use std::fs;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use board_client::infrastructure::http::{Credentials, ACCESS_TOKEN_KEY, USER_KEY};
use board_client::infrastructure::storage::{JsonFileStore, KeyValueStore};
use board_client::shared::error::ClientError;

use crate::common::test_user_json;

#[test]
fn test_file_store_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("nested").join("session.json");

    let store = JsonFileStore::open(&file).unwrap();
    store.set("accessToken", "abc").unwrap();
    store.set("theme", "dark").unwrap();
    store.remove("theme").unwrap();
    drop(store);

    let reopened = JsonFileStore::open(&file).unwrap();
    assert_eq!(reopened.get("accessToken").unwrap().as_deref(), Some("abc"));
    assert_eq!(reopened.get("theme").unwrap(), None);
}

#[test]
fn test_missing_file_is_empty_store() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::open(dir.path().join("absent.json")).unwrap();

    assert_eq!(store.get("accessToken").unwrap(), None);
    store.remove("accessToken").unwrap();
    assert!(!dir.path().join("absent.json").exists());
}

#[test]
fn test_corrupt_file_is_storage_error() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("session.json");
    fs::write(&file, "{ not json").unwrap();

    let err = JsonFileStore::open(&file).unwrap_err();

    assert!(matches!(err, ClientError::Storage(_)));
}

#[test]
fn test_credentials_survive_restart() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("session.json");
    let user = serde_json::from_value(test_user_json("MODERATOR")).unwrap();

    let first = Credentials::new(Arc::new(JsonFileStore::open(&file).unwrap()));
    first.establish("token-1".into(), Some("refresh-1".into()), user);

    let second = Credentials::new(Arc::new(JsonFileStore::open(&file).unwrap()));
    assert!(second.restore());
    assert_eq!(second.access_token().as_deref(), Some("token-1"));
    assert_eq!(second.refresh_token().as_deref(), Some("refresh-1"));
    assert_eq!(second.user().map(|u| u.username), Some("testuser".to_string()));
}

#[test]
fn test_restore_requires_user() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("session.json");
    let store = JsonFileStore::open(&file).unwrap();
    store.set(ACCESS_TOKEN_KEY, "token-1").unwrap();
    store.set(USER_KEY, "not a user").unwrap();

    let credentials = Credentials::new(Arc::new(store));

    assert!(!credentials.restore());
    assert!(!credentials.is_authenticated());
}
