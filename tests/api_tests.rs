use axum_test::TestServer;
use serde_json::json;

use moviezone::api::{create_router, AppState};
use moviezone::middleware::REQUEST_ID_HEADER;
use moviezone::models::{ItemId, UserId, UserRecord};

fn create_test_server() -> TestServer {
    let state = AppState::new();
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

fn seeded_server() -> TestServer {
    let state = AppState::with_users(vec![UserRecord {
        id: UserId(7),
        full_name: "Lan Nguyen".to_string(),
        email: "lan@example.com".to_string(),
        password: "secret1".to_string(),
        favorites: vec![ItemId(101)],
        created_at: None,
    }]);
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let server = create_test_server();
    let response = server.get("/health").await;
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
}

#[tokio::test]
async fn test_create_and_get_user() {
    let server = create_test_server();

    let response = server
        .post("/users")
        .json(&json!({
            "fullName": "Minh Tran",
            "email": "minh@example.com",
            "password": "pw123456"
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    let created: serde_json::Value = response.json();
    assert_eq!(created["email"], "minh@example.com");
    assert_eq!(created["favorites"], json!([]));
    let id = created["id"].as_u64().unwrap();

    let response = server.get(&format!("/users/{}", id)).await;
    response.assert_status_ok();
    let fetched: serde_json::Value = response.json();
    assert_eq!(fetched["fullName"], "Minh Tran");
}

#[tokio::test]
async fn test_find_users_by_email() {
    let server = seeded_server();

    let response = server
        .get("/users")
        .add_query_param("email", "lan@example.com")
        .await;
    response.assert_status_ok();
    let users: Vec<serde_json::Value> = response.json();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["id"], 7);

    let response = server
        .get("/users")
        .add_query_param("email", "nobody@example.com")
        .await;
    let users: Vec<serde_json::Value> = response.json();
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_patch_replaces_favorites_only() {
    let server = seeded_server();

    let response = server
        .patch("/users/7")
        .json(&json!({ "favorites": [202, 303] }))
        .await;
    response.assert_status_ok();

    let user: serde_json::Value = server.get("/users/7").await.json();
    assert_eq!(user["favorites"], json!([202, 303]));
    assert_eq!(user["fullName"], "Lan Nguyen");
    assert_eq!(user["email"], "lan@example.com");
}

#[tokio::test]
async fn test_unknown_user_is_404() {
    let server = create_test_server();

    let response = server.get("/users/99").await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);

    let response = server
        .patch("/users/99")
        .json(&json!({ "favorites": [] }))
        .await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_new_ids_follow_seeded_records() {
    let server = seeded_server();

    let response = server
        .post("/users")
        .json(&json!({
            "fullName": "Hoa",
            "email": "hoa@example.com",
            "password": "pw"
        }))
        .await;
    let created: serde_json::Value = response.json();
    assert_eq!(created["id"], 8);
}
