use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode, Uri},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const API_KEY_HEADER: &str = "apiKey";
pub const API_PREFIX: &str = "/v1/";

/// Plans served by `GET /v1/system/plan/{name}.json`.
pub const PLANS: &[(&str, u64, u64)] = &[
    ("FREE", 5, 100),
    ("BRONZE", 25, 1_000),
    ("SILVER", 50, 2_500),
    ("GOLD", 100, 10_000),
];

/// The provider's reply wrapper. `content` is omitted when `None`.
#[derive(Debug, Serialize)]
pub struct Envelope {
    #[serde(rename = "responseCode")]
    pub response_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
}

impl Envelope {
    pub fn success(content: Option<Value>) -> Self {
        Self {
            response_code: 200,
            message: "success".to_string(),
            content,
        }
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            response_code: status.as_u16(),
            message: message.into(),
            content: None,
        }
    }
}

#[derive(Debug, Clone)]
struct AppState {
    api_key: Arc<str>,
}

pub fn app(api_key: &str) -> Router {
    let state = AppState {
        api_key: Arc::from(api_key),
    };
    Router::new().fallback(handle).with_state(state)
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_key)).await
}

type Reply = (StatusCode, Json<Envelope>);

async fn handle(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
    body: String,
) -> Reply {
    let path = uri.path();

    let authorized = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|key| key == &*state.api_key);
    if !authorized {
        log::warn!("rejecting {method} {path}: bad or missing apiKey");
        return reply(
            StatusCode::UNAUTHORIZED,
            Envelope::error(
                StatusCode::UNAUTHORIZED,
                format!("You're not authorized to use ({path}) "),
            ),
        );
    }

    let Some(resource) = path
        .strip_prefix(API_PREFIX)
        .and_then(|p| p.strip_suffix(".json"))
    else {
        return reply(
            StatusCode::NOT_FOUND,
            Envelope::error(StatusCode::NOT_FOUND, format!("Requested URL ({path}) is not available!")),
        );
    };

    log::debug!("{method} /{resource} ({} params)", query.len());

    if method == Method::GET && resource == "user/logout" {
        return reply(StatusCode::OK, Envelope::success(None));
    }
    if let Some(name) = resource.strip_prefix("system/plan/") {
        if method == Method::GET {
            return plan(name);
        }
    }

    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&body).unwrap_or(Value::String(body))
    };
    let content_type: Vec<&str> = headers
        .get_all(CONTENT_TYPE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    let echo = json!({
        "method": method.as_str(),
        "path": path,
        "query": query,
        "content_type": content_type,
        "body": body,
    });
    reply(StatusCode::OK, Envelope::success(Some(echo)))
}

fn plan(name: &str) -> Reply {
    match PLANS.iter().find(|(plan, _, _)| *plan == name) {
        Some((plan, forms, submissions)) => reply(
            StatusCode::OK,
            Envelope::success(Some(json!({
                "name": plan,
                "limits": { "formCount": forms, "submissions": submissions },
            }))),
        ),
        None => reply(
            StatusCode::NOT_FOUND,
            Envelope::error(StatusCode::NOT_FOUND, format!("Plan {name} not found")),
        ),
    }
}

fn reply(status: StatusCode, envelope: Envelope) -> Reply {
    (status, Json(envelope))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_serializes_content() {
        let json = serde_json::to_value(Envelope::success(Some(json!([1])))).unwrap();
        assert_eq!(json["responseCode"], 200);
        assert_eq!(json["message"], "success");
        assert_eq!(json["content"], json!([1]));
    }

    #[test]
    fn error_envelope_omits_content() {
        let json = serde_json::to_value(Envelope::error(StatusCode::UNAUTHORIZED, "nope")).unwrap();
        assert_eq!(json["responseCode"], 401);
        assert!(json.get("content").is_none());
    }

    #[test]
    fn unknown_plan_is_not_found() {
        let (status, _) = plan("DIAMOND");
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn known_plan_reports_limits() {
        let (status, Json(envelope)) = plan("GOLD");
        assert_eq!(status, StatusCode::OK);
        let content = envelope.content.unwrap();
        assert_eq!(content["limits"]["formCount"], 100);
    }
}
