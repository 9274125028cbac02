//! Shared test utilities for integration tests.

use axum::body::Body;
use axum::http::Request;
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Basic};
use chirp_services::{config::Config, routes, tweets::storage::MockTweetStore};

/// Create the test app router with the default test configuration
/// (seeded `henry:secretpass` publisher and `admin:admin` admin accounts).
pub fn create_test_app(store: MockTweetStore) -> axum::Router {
    routes(store, Config::new_for_test())
}

/// Attach HTTP Basic credentials to a request.
#[allow(dead_code)]
pub fn with_basic_auth(mut request: Request<Body>, username: &str, password: &str) -> Request<Body> {
    request
        .headers_mut()
        .typed_insert(Authorization::basic(username, password));
    request
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
