//! Verify request building and response parsing against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Request vectors name an endpoint from the table, its path arguments and a
//! payload, and list the exact method, path and query pairs expected.
//! Response vectors pair a simulated reply with the unwrapped `content` or
//! the error variant it must produce.

use jotform_core::endpoints::{self, Payload};
use jotform_core::{ApiError, HistoryQuery, HttpMethod, HttpResponse, JotformClient, ListQuery};
use serde_json::Value;

const ORIGIN: &str = "https://api.jotform.com";

fn client() -> JotformClient {
    JotformClient::new("vector-key")
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn pairs(value: &Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let arr = pair.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let endpoint = endpoints::endpoint(case["endpoint"].as_str().unwrap())
            .unwrap_or_else(|| panic!("{name}: unknown endpoint"));
        let args: Vec<&str> = case["args"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a.as_str().unwrap())
            .collect();

        let payload = &case["payload"];
        let value = &payload["value"];
        let conditions: ListQuery;
        let history: HistoryQuery;
        let payload = match payload["kind"].as_str().unwrap() {
            "none" => Payload::None,
            "object" => Payload::Object(value),
            "document" => Payload::Document(value),
            "conditions" => {
                conditions = serde_json::from_value(value.clone()).unwrap();
                Payload::Conditions(&conditions)
            }
            "history" => {
                history = serde_json::from_value(value.clone()).unwrap();
                Payload::History(&history)
            }
            other => panic!("{name}: unknown payload kind {other}"),
        };

        let req = c.prepare(endpoint, &args, payload).unwrap();
        let expected = &case["expected_request"];

        assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, format!("{ORIGIN}{}", expected["path"].as_str().unwrap()), "{name}: url");
        assert_eq!(req.header("apiKey"), Some("vector-key"), "{name}: apiKey header");
        assert_eq!(req.headers.len(), 1, "{name}: only the apiKey header is sent");
        assert_eq!(req.query, pairs(&expected["query"]), "{name}: query");
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: sim["body"].as_str().unwrap().to_string(),
        };
        let result = c.parse_response(response);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "HttpStatus" => assert!(matches!(err, ApiError::HttpStatus { .. }), "{name}: expected HttpStatus"),
                "Decode" => assert!(matches!(err, ApiError::Decode(_)), "{name}: expected Decode"),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        } else {
            let content = result.unwrap();
            let expected = &case["expected_result"];
            if expected.is_null() {
                assert!(content.is_none(), "{name}: expected no content");
            } else {
                assert_eq!(content.as_ref(), Some(expected), "{name}: parsed result");
            }
        }
    }
}
