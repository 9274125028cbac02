//! Integration tests for the ingestion path (POST /tweet).

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chirp_services::tweets::storage::MockTweetStore;
use common::{body_json, create_test_app, with_basic_auth};
use tower::ServiceExt;

fn publish_request(text: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/tweet")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({ "text": text }).to_string(),
        ))
        .unwrap()
}

#[tokio::test]
async fn test_publish_without_auth_returns_401() {
    let app = create_test_app(MockTweetStore::new());

    let response = app.oneshot(publish_request("hi #there")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let challenge = response
        .headers()
        .get("www-authenticate")
        .and_then(|v| v.to_str().ok());
    assert_eq!(challenge, Some("Basic realm=\"chirp\""));
}

#[tokio::test]
async fn test_publish_with_wrong_password_returns_401() {
    let app = create_test_app(MockTweetStore::new());

    let request = with_basic_auth(publish_request("hi #there"), "henry", "guess");
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_account_cannot_publish() {
    let app = create_test_app(MockTweetStore::new());

    let request = with_basic_auth(publish_request("hi #there"), "admin", "admin");
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_publish_returns_extracted_tags() {
    let store = MockTweetStore::new();
    let app = create_test_app(store.clone());

    let request = with_basic_auth(
        publish_request("My #awesome tweet! #yolo"),
        "henry",
        "secretpass",
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "success");
    assert_eq!(json["tags"], serde_json::json!(["awesome", "yolo"]));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_published_tweet_shows_up_in_the_tag_timeline() {
    let app = create_test_app(MockTweetStore::new());

    let request = with_basic_auth(
        publish_request("My #awesome tweet! #yolo"),
        "henry",
        "secretpass",
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/tweet/yolo")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["tweets"].as_array().unwrap().len(), 1);
    assert_eq!(json["tweets"][0]["text"], "My #awesome tweet! #yolo");
    assert_eq!(json["tweets"][0]["author"], "henry");
    assert!(json["tweets"][0]["created"].is_string());
}

#[tokio::test]
async fn test_publish_without_tags_returns_empty_tag_list() {
    let app = create_test_app(MockTweetStore::new());

    let request = with_basic_auth(publish_request("no tags here"), "henry", "secretpass");
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["tags"], serde_json::json!([]));
}

#[tokio::test]
async fn test_publish_with_malformed_json_is_a_client_error() {
    let app = create_test_app(MockTweetStore::new());

    let request = with_basic_auth(
        Request::builder()
            .method("POST")
            .uri("/tweet")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap(),
        "henry",
        "secretpass",
    );
    let response = app.oneshot(request).await.unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_publish_against_a_failing_store_returns_500() {
    let app = create_test_app(MockTweetStore::failing());

    let request = with_basic_auth(publish_request("hi #there"), "henry", "secretpass");
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("database error"));
}
