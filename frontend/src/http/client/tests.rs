use super::*;
use crate::http::{MemoryTokenStore, MockHttpClient, MockReply};
use crate::error::ErrorKind;
use learnify_shared::Course;
use serde_json::json;
use std::cell::RefCell;

// =========================================================
// 辅助函数
// =========================================================

const BASE: &str = "http://api.test";

fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

fn setup(token: Option<&str>) -> (ApiClient, Rc<MockHttpClient>, Rc<MemoryTokenStore>) {
    let mock = Rc::new(MockHttpClient::new());
    let tokens = Rc::new(match token {
        Some(t) => MemoryTokenStore::with_token(t),
        None => MemoryTokenStore::new(),
    });
    let client = ApiClient::new(ClientConfig::new(BASE), mock.clone(), tokens.clone());
    (client, mock, tokens)
}

fn record_events(client: &ApiClient) -> Rc<RefCell<Vec<TokenEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    client.on_token_change(move |e| sink.borrow_mut().push(e.clone()));
    events
}

fn refresh_ok(mock: &MockHttpClient, token: &str) {
    mock.mock_response(
        HttpMethod::Post,
        &url("/auth/refresh"),
        200,
        json!({ "accessToken": token }),
    );
}

// =========================================================
// 请求头
// =========================================================

#[tokio::test]
async fn test_no_token_sends_no_authorization_header() {
    let (client, mock, _) = setup(None);
    mock.mock_response(HttpMethod::Get, &url("/courses"), 200, json!([]));

    let courses: Vec<Course> = client.get("/courses").await.unwrap();
    assert!(courses.is_empty());

    let sent = mock.last_request(HttpMethod::Get, &url("/courses")).unwrap();
    assert_eq!(sent.header("Authorization"), None);
    assert_eq!(sent.header("Content-Type"), Some("application/json"));
}

#[tokio::test]
async fn test_cached_token_sends_bearer_header() {
    let (client, mock, _) = setup(Some("abc"));
    mock.mock_response(HttpMethod::Get, &url("/courses"), 200, json!([]));

    let _: Vec<Course> = client.get("/courses").await.unwrap();

    let sent = mock.last_request(HttpMethod::Get, &url("/courses")).unwrap();
    assert_eq!(sent.header("Authorization"), Some("Bearer abc"));
}

#[tokio::test]
async fn test_body_is_serialized_as_json() {
    let (client, mock, _) = setup(Some("abc"));
    mock.mock_response(HttpMethod::Put, &url("/me"), 200, json!({}));

    let _: serde_json::Value = client
        .put("/me", &json!({ "firstName": "Ana" }))
        .await
        .unwrap();

    let sent = mock.last_request(HttpMethod::Put, &url("/me")).unwrap();
    assert_eq!(sent.body.as_deref(), Some(r#"{"firstName":"Ana"}"#));
}

// =========================================================
// 401 拦截
// =========================================================

#[tokio::test]
async fn test_retries_once_after_successful_refresh() {
    let (client, mock, tokens) = setup(Some("old"));
    let events = record_events(&client);
    mock.on(
        HttpMethod::Get,
        &url("/courses"),
        MockReply::RequireToken {
            token: "new".to_string(),
            status: 200,
            body: "[]".to_string(),
        },
    );
    refresh_ok(&mock, "new");

    let courses: Vec<Course> = client.get("/courses").await.unwrap();
    assert!(courses.is_empty());

    assert_eq!(mock.count(HttpMethod::Post, &url("/auth/refresh")), 1);
    assert_eq!(mock.count(HttpMethod::Get, &url("/courses")), 2);
    let retried = mock.last_request(HttpMethod::Get, &url("/courses")).unwrap();
    assert_eq!(retried.header("Authorization"), Some("Bearer new"));
    assert_eq!(tokens.load().as_deref(), Some("new"));
    assert_eq!(*events.borrow(), vec![TokenEvent::Refreshed("new".to_string())]);
}

#[tokio::test]
async fn test_refresh_failure_clears_token_and_surfaces_error() {
    let (client, mock, tokens) = setup(Some("old"));
    let events = record_events(&client);
    mock.mock_response(HttpMethod::Get, &url("/me"), 401, json!(null));
    mock.mock_response(HttpMethod::Post, &url("/auth/refresh"), 401, json!(null));

    let err = client.get::<serde_json::Value>("/me").await.unwrap_err();

    assert_eq!(err.status, Some(401));
    assert_eq!(err.kind, ErrorKind::Http);
    assert_eq!(mock.count(HttpMethod::Post, &url("/auth/refresh")), 1);
    assert_eq!(mock.count(HttpMethod::Get, &url("/me")), 1);
    assert_eq!(tokens.load(), None);
    assert_eq!(*events.borrow(), vec![TokenEvent::Cleared]);
}

#[tokio::test]
async fn test_refresh_network_failure_also_clears_token() {
    let (client, mock, tokens) = setup(Some("old"));
    mock.mock_response(HttpMethod::Get, &url("/me"), 401, json!(null));
    mock.on(HttpMethod::Post, &url("/auth/refresh"), MockReply::NetworkDown);

    let err = client.get::<serde_json::Value>("/me").await.unwrap_err();

    assert_eq!(err.status, Some(401));
    assert_eq!(tokens.load(), None);
}

#[tokio::test]
async fn test_refresh_endpoint_401_is_never_retried() {
    let (client, mock, _) = setup(Some("old"));
    mock.mock_response(HttpMethod::Post, &url("/auth/refresh"), 401, json!(null));

    // 直接调用 refresh 路径
    let direct = client.post_empty::<serde_json::Value>("/auth/refresh").await;
    assert!(direct.is_err());
    assert_eq!(mock.count(HttpMethod::Post, &url("/auth/refresh")), 1);

    // 通过刷新入口调用
    let refreshed = client.refresh_access_token().await;
    assert!(refreshed.is_err());
    assert_eq!(mock.count(HttpMethod::Post, &url("/auth/refresh")), 2);
}

#[tokio::test]
async fn test_second_401_after_refresh_does_not_loop() {
    let (client, mock, _) = setup(Some("old"));
    mock.mock_response(HttpMethod::Get, &url("/courses"), 401, json!(null));
    refresh_ok(&mock, "new");

    let err = client.get::<Vec<Course>>("/courses").await.unwrap_err();

    assert_eq!(err.status, Some(401));
    assert_eq!(mock.count(HttpMethod::Get, &url("/courses")), 2);
    assert_eq!(mock.count(HttpMethod::Post, &url("/auth/refresh")), 1);
}

#[tokio::test]
async fn test_login_401_does_not_trigger_refresh() {
    let (client, mock, _) = setup(None);
    mock.mock_response(HttpMethod::Post, &url("/auth/login"), 401, json!(null));

    let err = client
        .post::<_, serde_json::Value>("/auth/login", &json!({ "email": "a@b.com", "password": "bad" }))
        .await
        .unwrap_err();

    assert_eq!(err.message, "Invalid email or password.");
    assert_eq!(mock.count(HttpMethod::Post, &url("/auth/refresh")), 0);
}

#[tokio::test]
async fn test_other_errors_pass_through_without_refresh() {
    let (client, mock, tokens) = setup(Some("abc"));
    mock.mock_response(HttpMethod::Get, &url("/courses/9"), 404, json!(null));
    mock.mock_response(HttpMethod::Get, &url("/users"), 403, json!(null));

    let not_found = client.get::<Course>("/courses/9").await.unwrap_err();
    let forbidden = client.get::<Vec<serde_json::Value>>("/users").await.unwrap_err();

    assert_eq!(not_found.status, Some(404));
    assert_eq!(forbidden.status, Some(403));
    assert_eq!(mock.count(HttpMethod::Post, &url("/auth/refresh")), 0);
    assert_eq!(tokens.load().as_deref(), Some("abc"));
}

#[tokio::test]
async fn test_concurrent_401s_share_one_refresh() {
    let (client, mock, _) = setup(Some("old"));
    mock.set_yield(true);
    for path in ["/courses", "/enrollments/me"] {
        mock.on(
            HttpMethod::Get,
            &url(path),
            MockReply::RequireToken {
                token: "new".to_string(),
                status: 200,
                body: "[]".to_string(),
            },
        );
    }
    refresh_ok(&mock, "new");

    let (a, b) = futures::join!(
        client.get::<Vec<serde_json::Value>>("/courses"),
        client.get::<Vec<serde_json::Value>>("/enrollments/me"),
    );

    assert!(a.is_ok());
    assert!(b.is_ok());
    assert_eq!(mock.count(HttpMethod::Post, &url("/auth/refresh")), 1);
}

#[tokio::test]
async fn test_abandoned_refresh_releases_client() {
    let (client, mock, _) = setup(Some("old"));
    mock.set_yield(true);
    refresh_ok(&mock, "new");
    let inner = Rc::downgrade(&client.inner);

    // 停在传输层的让出点上，刷新仍挂在 slot 里
    let mut refresh = Box::pin(client.refresh_access_token());
    assert!(futures::poll!(refresh.as_mut()).is_pending());
    assert!(client.inner.refresh_in_flight.borrow().is_some());

    drop(refresh);
    drop(client);
    assert!(inner.upgrade().is_none());
}

#[tokio::test]
async fn test_settled_refresh_clears_slot() {
    let (client, mock, tokens) = setup(Some("old"));
    refresh_ok(&mock, "new");

    assert_eq!(client.refresh_access_token().await.unwrap(), "new");
    assert!(client.inner.refresh_in_flight.borrow().is_none());
    assert_eq!(tokens.load().as_deref(), Some("new"));
}

// =========================================================
// 传输与解码
// =========================================================

#[tokio::test]
async fn test_network_failure_is_normalized() {
    let (client, mock, _) = setup(None);
    mock.on(HttpMethod::Get, &url("/courses"), MockReply::NetworkDown);

    let err = client.get::<Vec<Course>>("/courses").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Network);
    assert_eq!(err.status, None);
}

#[tokio::test]
async fn test_empty_body_decodes_as_unit_and_none() {
    let (client, mock, _) = setup(Some("abc"));
    mock.on(
        HttpMethod::Delete,
        &url("/courses/1"),
        MockReply::Status(204, String::new()),
    );
    mock.on(
        HttpMethod::Post,
        &url("/courses/1/enroll"),
        MockReply::Status(201, String::new()),
    );

    client.delete("/courses/1").await.unwrap();
    let enrolled: Option<serde_json::Value> = client.post_empty("/courses/1/enroll").await.unwrap();
    assert!(enrolled.is_none());
}

#[tokio::test]
async fn test_undecodable_success_body() {
    let (client, mock, _) = setup(None);
    mock.on(
        HttpMethod::Get,
        &url("/courses"),
        MockReply::Status(200, "<html>".to_string()),
    );

    let err = client.get::<Vec<Course>>("/courses").await.unwrap_err();
    assert_eq!(err.status, Some(200));
    assert_eq!(err.message, "Unexpected response from server.");
}
