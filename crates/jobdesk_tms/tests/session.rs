use std::path::PathBuf;

use jobdesk_tms::{SessionError, SessionSource, StoredSessionSource, UserInfo};
use serde_json::{json, Value};

const TMS_ORIGIN: &str = "https://www.translationtms.com";

fn write_store(value: Value) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("tms_session.json");
    std::fs::write(&path, value.to_string()).expect("write store");
    (dir, path)
}

#[tokio::test]
async fn reads_token_and_stringified_user_info() {
    let (_dir, path) = write_store(json!({
        "origin": TMS_ORIGIN,
        "auth_token": "tok-123",
        "user_info": "{\"id\":171,\"email\":\"me@example.com\"}",
    }));
    let source = StoredSessionSource::new(&path, TMS_ORIGIN);

    assert_eq!(source.auth_token().await.expect("token"), "tok-123");
    let user = source.user_info().await.expect("user info");
    assert_eq!(user.id, Some(171));
    assert_eq!(user.contact_email(), Some("me@example.com"));
}

#[tokio::test]
async fn inline_user_info_object_is_accepted() {
    let (_dir, path) = write_store(json!({
        "origin": TMS_ORIGIN,
        "auth_token": "tok-123",
        "user_info": { "id": 171, "username": "mrossi" },
    }));
    let source = StoredSessionSource::new(&path, TMS_ORIGIN);

    let user = source.user_info().await.expect("user info");
    assert_eq!(user.id, Some(171));
    assert_eq!(user.contact_email(), Some("mrossi"));
}

#[tokio::test]
async fn wrong_origin_is_rejected_before_anything_is_read() {
    let (_dir, path) = write_store(json!({
        "origin": "https://other.example.com",
        "auth_token": "tok-123",
        "user_info": { "id": 171 },
    }));
    let source = StoredSessionSource::new(&path, TMS_ORIGIN);

    assert!(matches!(
        source.auth_token().await.unwrap_err(),
        SessionError::OriginMismatch { .. }
    ));
    assert!(matches!(
        source.user_info().await.unwrap_err(),
        SessionError::OriginMismatch { .. }
    ));
}

#[tokio::test]
async fn missing_token_is_its_own_error() {
    let (_dir, path) = write_store(json!({
        "origin": TMS_ORIGIN,
        "user_info": { "id": 171 },
    }));
    let source = StoredSessionSource::new(&path, TMS_ORIGIN);

    assert!(matches!(
        source.auth_token().await.unwrap_err(),
        SessionError::TokenMissing
    ));
}

#[tokio::test]
async fn empty_token_counts_as_missing() {
    let (_dir, path) = write_store(json!({
        "origin": TMS_ORIGIN,
        "auth_token": "",
        "user_info": { "id": 171 },
    }));
    let source = StoredSessionSource::new(&path, TMS_ORIGIN);

    assert!(matches!(
        source.auth_token().await.unwrap_err(),
        SessionError::TokenMissing
    ));
}

#[tokio::test]
async fn non_numeric_user_id_is_rejected() {
    let (_dir, path) = write_store(json!({
        "origin": TMS_ORIGIN,
        "auth_token": "tok-123",
        "user_info": { "id": "171" },
    }));
    let source = StoredSessionSource::new(&path, TMS_ORIGIN);

    assert!(matches!(
        source.user_info().await.unwrap_err(),
        SessionError::UserIdMissing
    ));
}

#[tokio::test]
async fn absent_store_file_reports_the_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nope.json");
    let source = StoredSessionSource::new(&path, TMS_ORIGIN);

    match source.auth_token().await.unwrap_err() {
        SessionError::StoreUnavailable { path: reported, .. } => {
            assert!(reported.contains("nope.json"));
        }
        other => panic!("expected StoreUnavailable, got {other:?}"),
    }
}

#[test]
fn contact_email_fallback_chain_is_ordered() {
    let user = UserInfo {
        id: Some(1),
        email: Some("a@example.com".to_string()),
        username: Some("b".to_string()),
        user_name: Some("c".to_string()),
        user_email: Some("d@example.com".to_string()),
    };
    assert_eq!(user.contact_email(), Some("a@example.com"));

    let user = UserInfo {
        id: Some(1),
        user_name: Some("c".to_string()),
        user_email: Some("d@example.com".to_string()),
        ..UserInfo::default()
    };
    assert_eq!(user.contact_email(), Some("c"));

    assert_eq!(UserInfo::default().contact_email(), None);
}
