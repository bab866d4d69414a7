use serde_json::Value;

use super::setup::TestResponse;

/// Asserts the browser-facing CORS headers are present on a response
pub fn assert_cors_headers(response: &TestResponse) {
    assert_eq!(response.headers["access-control-allow-origin"], "*");
    assert_eq!(
        response.headers["access-control-allow-methods"],
        "GET, POST, OPTIONS"
    );
    assert_eq!(response.headers["access-control-allow-headers"], "Content-Type");
}

/// Extracts the payloads of a poll response, in order
pub fn payloads(response: &TestResponse) -> Vec<Value> {
    response
        .messages()
        .iter()
        .map(|envelope| envelope["message"].clone())
        .collect()
}
