//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{StatusCode, header::CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

/// The number of bytes of a body that are logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

const REDACTED: &str = "********";

const UNPARSEABLE_BODY: &str = "<invalid JSON body>";

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
/// Passwords in JSON request bodies are replaced with asterisks and JSON
/// request bodies that cannot be parsed are not logged.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match read_body(body).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("could not read request body: {error}");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    let body_text = String::from_utf8_lossy(&body_bytes);
    let is_json = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));

    if is_json {
        log_request(&parts, &redact_password(&body_text));
    } else {
        log_request(&parts, &body_text);
    }

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match read_body(body).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    log_response(&parts, &String::from_utf8_lossy(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

async fn read_body(body: Body) -> Result<Bytes, axum::Error> {
    axum::body::to_bytes(body, usize::MAX).await
}

/// Replace the value of every `password` field in a JSON body, at any depth.
///
/// Bodies that are not valid JSON are replaced entirely since they may still
/// contain a password.
fn redact_password(json_text: &str) -> String {
    if json_text.is_empty() {
        return String::new();
    }

    match serde_json::from_str::<Value>(json_text) {
        Ok(mut value) => {
            redact_value(&mut value);
            value.to_string()
        }
        Err(_) => UNPARSEABLE_BODY.to_owned(),
    }
}

fn redact_value(value: &mut Value) {
    match value {
        Value::Object(object) => {
            for (key, value) in object.iter_mut() {
                if key.to_lowercase().contains("password") {
                    *value = Value::String(REDACTED.to_owned());
                } else {
                    redact_value(value);
                }
            }
        }
        Value::Array(values) => values.iter_mut().for_each(redact_value),
        _ => {}
    }
}

/// The longest prefix of `text` that fits in [LOG_BODY_LENGTH_LIMIT] bytes
/// without splitting a character.
fn truncate(text: &str) -> &str {
    let mut end = LOG_BODY_LENGTH_LIMIT.min(text.len());

    while !text.is_char_boundary(end) {
        end -= 1;
    }

    &text[..end]
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {} {}\nbody: {}...",
            parts.method,
            parts.uri,
            truncate(body)
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!(
            "Received request: {} {}\nbody: {body:?}",
            parts.method,
            parts.uri
        );
    }
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {}\nbody: {}...",
            parts.status,
            truncate(body)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {}\nbody: {body:?}", parts.status);
    }
}

#[cfg(test)]
mod tests {
    use axum::{Json, Router, middleware, routing::post};
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::logging::{
        LOG_BODY_LENGTH_LIMIT, UNPARSEABLE_BODY, logging_middleware, redact_password, truncate,
    };

    #[test]
    fn redacts_password_fields() {
        let redacted = redact_password(r#"{"username":"budi","password":"hunter2"}"#);

        let value: Value = serde_json::from_str(&redacted).unwrap();
        assert_eq!(value, json!({ "username": "budi", "password": "********" }));
    }

    #[test]
    fn redacts_nested_password_fields() {
        let redacted = redact_password(
            r#"{"user":{"name":"budi","Password":"hunter2"},"history":[{"old_password":"x"}]}"#,
        );

        let value: Value = serde_json::from_str(&redacted).unwrap();
        assert_eq!(
            value,
            json!({
                "user": { "name": "budi", "Password": "********" },
                "history": [{ "old_password": "********" }]
            })
        );
    }

    #[test]
    fn hides_invalid_json_bodies() {
        let redacted = redact_password(r#"{"username":"budi","password":"hunter2""#);

        assert_eq!(redacted, UNPARSEABLE_BODY);
        assert!(!redacted.contains("hunter2"));
    }

    #[test]
    fn leaves_empty_body_empty() {
        assert_eq!(redact_password(""), "");
    }

    #[test]
    fn truncate_does_not_split_characters() {
        let text = "é".repeat(LOG_BODY_LENGTH_LIMIT);

        let truncated = truncate(&text);

        assert!(truncated.len() <= LOG_BODY_LENGTH_LIMIT);
        assert!(truncated.chars().all(|c| c == 'é'));
    }

    #[tokio::test]
    async fn passes_body_through_unchanged() {
        let app = Router::new()
            .route("/echo", post(|Json(body): Json<Value>| async { Json(body) }))
            .layer(middleware::from_fn(logging_middleware));
        let server = TestServer::new(app);
        let body = json!({ "username": "budi", "password": "hunter2" });

        let response = server.post("/echo").json(&body).await;

        response.assert_status_ok();
        response.assert_json(&body);
    }
}
