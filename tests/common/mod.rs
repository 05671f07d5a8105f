//! In-process mock of the admin REST API.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const TOKEN: &str = "test-token";
pub const PASSWORD: &str = "secret1";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct MockState {
    pub collections: HashMap<String, Vec<Value>>,
    pub requests: Vec<Recorded>,
    pub reject_auth: bool,
    pub fail_collection: Option<String>,
}

#[derive(Clone, Default)]
pub struct MockApi {
    pub state: Arc<Mutex<MockState>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, collection: &str, rows: Vec<Value>) {
        self.state
            .lock()
            .unwrap()
            .collections
            .insert(collection.to_string(), rows);
    }

    pub fn rows(&self, collection: &str) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn reject_auth(&self, reject: bool) {
        self.state.lock().unwrap().reject_auth = reject;
    }

    pub fn fail_collection(&self, collection: &str) {
        self.state.lock().unwrap().fail_collection = Some(collection.to_string());
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    /// Starts the server and returns its base url.
    pub async fn spawn(&self) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock api");
        let addr = listener.local_addr().expect("mock api addr");
        let app = Router::new()
            .route("/api/Auth/login", post(login))
            .route("/api/Auth/register", post(register))
            .route("/api/{collection}", get(list).post(create))
            .route("/api/{collection}/{id}", put(update).delete(remove))
            .with_state(self.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }

    fn record(&self, method: Method, path: String, headers: &HeaderMap, body: Option<Value>) {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.state.lock().unwrap().requests.push(Recorded {
            method,
            path,
            authorization,
            body,
        });
    }

    fn check_auth(&self, headers: &HeaderMap) -> Result<(), Response> {
        let state = self.state.lock().unwrap();
        let bearer = format!("Bearer {}", TOKEN);
        let ok = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == bearer);
        if state.reject_auth || !ok {
            return Err(StatusCode::UNAUTHORIZED.into_response());
        }
        Ok(())
    }
}

fn id_key(collection: &str) -> &'static str {
    if collection == "Users" { "userId" } else { "id" }
}

async fn list(
    State(api): State<MockApi>,
    Path(collection): Path<String>,
    headers: HeaderMap,
) -> Response {
    api.record(Method::GET, format!("/api/{}", collection), &headers, None);
    if let Err(denied) = api.check_auth(&headers) {
        return denied;
    }
    if api.state.lock().unwrap().fail_collection.as_deref() == Some(collection.as_str()) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    Json(api.rows(&collection)).into_response()
}

async fn create(
    State(api): State<MockApi>,
    Path(collection): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    api.record(Method::POST, format!("/api/{}", collection), &headers, Some(body.clone()));
    if let Err(denied) = api.check_auth(&headers) {
        return denied;
    }
    if body.get("name").and_then(Value::as_str) == Some("duplicate") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Name already exists" })),
        )
            .into_response();
    }

    let key = id_key(&collection);
    let mut state = api.state.lock().unwrap();
    let rows = state.collections.entry(collection).or_default();
    let next = rows.iter().filter_map(|r| r[key].as_i64()).max().unwrap_or(0) + 1;
    let mut record = body;
    record[key] = json!(next);
    rows.push(record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn update(
    State(api): State<MockApi>,
    Path((collection, id)): Path<(String, i64)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    api.record(
        Method::PUT,
        format!("/api/{}/{}", collection, id),
        &headers,
        Some(body.clone()),
    );
    if let Err(denied) = api.check_auth(&headers) {
        return denied;
    }

    let key = id_key(&collection);
    let mut state = api.state.lock().unwrap();
    let rows = state.collections.entry(collection).or_default();
    let Some(row) = rows.iter_mut().find(|r| r[key].as_i64() == Some(id)) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let (Some(target), Some(fields)) = (row.as_object_mut(), body.as_object()) {
        for (k, v) in fields {
            target.insert(k.clone(), v.clone());
        }
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn remove(
    State(api): State<MockApi>,
    Path((collection, id)): Path<(String, i64)>,
    headers: HeaderMap,
) -> Response {
    api.record(Method::DELETE, format!("/api/{}/{}", collection, id), &headers, None);
    if let Err(denied) = api.check_auth(&headers) {
        return denied;
    }

    let key = id_key(&collection);
    let mut state = api.state.lock().unwrap();
    let rows = state.collections.entry(collection).or_default();
    let before = rows.len();
    rows.retain(|r| r[key].as_i64() != Some(id));
    if rows.len() == before {
        return StatusCode::NOT_FOUND.into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn login(State(api): State<MockApi>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    api.record(Method::POST, "/api/Auth/login".to_string(), &headers, Some(body.clone()));
    if body["password"].as_str() != Some(PASSWORD) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid email or password" })),
        )
            .into_response();
    }
    Json(json!({
        "token": TOKEN,
        "userId": 1,
        "fullName": "Nadia Islam",
        "email": body["email"],
        "phoneNumber": "01712345678",
        "roleName": "Admin"
    }))
    .into_response()
}

async fn register(State(api): State<MockApi>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    api.record(Method::POST, "/api/Auth/register".to_string(), &headers, Some(body.clone()));
    Json(json!({
        "token": TOKEN,
        "userId": 2,
        "fullName": body["fullName"],
        "email": body["email"],
        "phoneNumber": body["phoneNumber"]
    }))
    .into_response()
}

pub fn category(id: i64) -> Value {
    json!({
        "id": id,
        "name": format!("Category {}", id),
        "description": "",
        "courseCount": id % 3
    })
}

pub fn categories(n: i64) -> Vec<Value> {
    (1..=n).map(category).collect()
}
