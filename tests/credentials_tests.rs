use std::env;
use stellar_burgers::{
    FileCredentialStore, MemoryCredentialStore,
    credentials::{CredentialError, CredentialStore},
    models::AuthTokens,
};
use uuid::Uuid;

fn scratch_store() -> FileCredentialStore {
    let path = env::temp_dir()
        .join(format!("stellar-burgers-{}", Uuid::new_v4()))
        .join("nested/credentials.json");
    FileCredentialStore::new(path)
}

fn sample_tokens() -> AuthTokens {
    AuthTokens {
        access_token: "Bearer access".to_string(),
        refresh_token: "refresh".to_string(),
    }
}

#[tokio::test]
async fn test_file_store_is_empty_before_first_save() {
    let store = scratch_store();

    assert!(store.load().await.unwrap().is_none());
    store.clear().await.expect("clearing an empty store is fine");
}

#[tokio::test]
async fn test_file_store_persists_across_instances() {
    let store = scratch_store();
    store.save(&sample_tokens()).await.unwrap();

    let reopened = FileCredentialStore::new(store.path());
    assert_eq!(reopened.load().await.unwrap(), Some(sample_tokens()));

    let raw = tokio::fs::read_to_string(store.path()).await.unwrap();
    assert!(raw.contains("\"refreshToken\""));

    reopened.clear().await.unwrap();
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn test_file_store_reports_malformed_content() {
    let store = scratch_store();
    store.save(&sample_tokens()).await.unwrap();
    tokio::fs::write(store.path(), b"not json").await.unwrap();

    let result = store.load().await;
    assert!(matches!(result, Err(CredentialError::Malformed(_))));
}

#[tokio::test]
async fn test_memory_store_round_trip() {
    let store = MemoryCredentialStore::new();
    assert!(store.load().await.unwrap().is_none());

    store.save(&sample_tokens()).await.unwrap();
    assert_eq!(store.load().await.unwrap(), Some(sample_tokens()));

    store.clear().await.unwrap();
    assert!(store.load().await.unwrap().is_none());
}
