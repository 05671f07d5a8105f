mod common;

use std::sync::Arc;

use admin::api::{HttpAdminClient, ResourceApi};
use admin::config::ApiConfig;
use admin::error::AppError;
use admin::models::{Category, CategoryDraft, User, UserDraft};
use admin::session::{MemorySessionStore, SessionStore};
use axum::http::Method;
use reqwest::StatusCode;
use serde_json::json;

use common::{MockApi, TOKEN, categories};

async fn client_for(api: &MockApi, session: Arc<dyn SessionStore>) -> HttpAdminClient {
    let base_url = api.spawn().await;
    HttpAdminClient::new(ApiConfig::new(base_url, "unused.json"), session).expect("client")
}

async fn logged_in(api: &MockApi) -> HttpAdminClient {
    client_for(api, Arc::new(MemorySessionStore::with_token(TOKEN))).await
}

fn draft(name: &str) -> CategoryDraft {
    CategoryDraft {
        name: name.to_string(),
        description: "Visual arts".to_string(),
    }
}

#[tokio::test]
async fn test_list_sends_bearer_token() {
    let api = MockApi::new();
    api.seed("CourseCategories", categories(3));
    let client = logged_in(&api).await;

    let rows: Vec<Category> = ResourceApi::<Category>::list(&client).await.unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].name, "Category 3");
    let requests = api.requests();
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].path, "/api/CourseCategories");
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer test-token"));
}

#[tokio::test]
async fn test_create_returns_server_record() {
    let api = MockApi::new();
    api.seed("CourseCategories", categories(2));
    let client = logged_in(&api).await;

    let created = ResourceApi::<Category>::create(&client, &draft("Art")).await.unwrap();

    let created = created.expect("created record");
    assert_eq!(created.id, 3);
    assert_eq!(created.name, "Art");
    assert_eq!(api.rows("CourseCategories").len(), 3);
}

#[tokio::test]
async fn test_update_accepts_no_content_and_carries_id() {
    let api = MockApi::new();
    api.seed("CourseCategories", categories(2));
    let client = logged_in(&api).await;

    let updated = ResourceApi::<Category>::update(&client, 2, &draft("Renamed")).await.unwrap();

    assert!(updated.is_none());
    let request = api.requests().pop().unwrap();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.path, "/api/CourseCategories/2");
    assert_eq!(request.body.unwrap()["id"], json!(2));
    assert_eq!(api.rows("CourseCategories")[1]["name"], json!("Renamed"));
}

#[tokio::test]
async fn test_user_update_uses_user_id_field() {
    let api = MockApi::new();
    api.seed(
        "Users",
        vec![json!({"userId": 5, "fullName": "Rafi", "email": "rafi@example.com", "roleId": 1})],
    );
    let client = logged_in(&api).await;

    let users: Vec<User> = ResourceApi::<User>::list(&client).await.unwrap();
    assert_eq!(users[0].id, 5);

    let draft = UserDraft {
        full_name: "Rafi Ahmed".to_string(),
        email: "rafi@example.com".to_string(),
        phone_number: None,
        role_id: 2,
        password: None,
    };
    ResourceApi::<User>::update(&client, 5, &draft).await.unwrap();

    let body = api.requests().pop().unwrap().body.unwrap();
    assert_eq!(body["userId"], json!(5));
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_delete_removes_remote_record() {
    let api = MockApi::new();
    api.seed("CourseCategories", categories(4));
    let client = logged_in(&api).await;

    ResourceApi::<Category>::delete(&client, 3).await.unwrap();

    let ids: Vec<i64> = api
        .rows("CourseCategories")
        .iter()
        .filter_map(|r| r["id"].as_i64())
        .collect();
    assert_eq!(ids, vec![1, 2, 4]);
}

#[tokio::test]
async fn test_delete_missing_record_is_not_found() {
    let api = MockApi::new();
    api.seed("CourseCategories", categories(1));
    let client = logged_in(&api).await;

    let result = ResourceApi::<Category>::delete(&client, 99).await;

    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_rejected_token_is_unauthorized() {
    let api = MockApi::new();
    api.reject_auth(true);
    let client = logged_in(&api).await;

    let result = ResourceApi::<Category>::list(&client).await;

    assert!(matches!(result, Err(AppError::Unauthorized(StatusCode::UNAUTHORIZED))));
}

#[tokio::test]
async fn test_missing_token_sends_nothing() {
    let api = MockApi::new();
    let client = client_for(&api, Arc::new(MemorySessionStore::new())).await;

    let result = ResourceApi::<Category>::list(&client).await;

    assert!(matches!(result, Err(AppError::MissingToken)));
    assert_eq!(api.request_count(), 0);
}

#[tokio::test]
async fn test_api_error_message_is_kept() {
    let api = MockApi::new();
    let client = logged_in(&api).await;

    let err = ResourceApi::<Category>::create(&client, &draft("duplicate"))
        .await
        .unwrap_err();

    match err {
        AppError::Api { status, message } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(message, "Name already exists");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let api = MockApi::new();
    api.seed("CourseCategories", vec![json!({"id": "not-a-number"})]);
    let client = logged_in(&api).await;

    let result = ResourceApi::<Category>::list(&client).await;

    assert!(matches!(result, Err(AppError::Decode(_))));
}
