//! Middleware for logging requests and responses.

use axum::{extract::Request, http::header::CONTENT_TYPE, middleware::Next, response::Response};

const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is truncated
/// and logged in full at the `debug` level. Password fields in JSON request
/// bodies are redacted before logging.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body_text) = extract_parts_and_body_text_from_request(request).await;

    if parts.headers.get(CONTENT_TYPE) == Some(&"application/json".parse().unwrap()) {
        let display_text = redact_password(&body_text, "password");
        log_request(&parts, &display_text);
    } else {
        log_request(&parts, &body_text);
    }

    let request = Request::from_parts(parts, body_text.into());
    let response = next.run(request).await;

    let (parts, body_text) = extract_parts_and_body_text_from_response(response).await;
    log_response(&parts, &body_text);

    Response::from_parts(parts, body_text.into())
}

fn redact_password(body_text: &str, field_name: &str) -> String {
    let mut body = match serde_json::from_str::<serde_json::Value>(body_text) {
        Ok(body) => body,
        Err(_) => return body_text.to_string(),
    };

    match body
        .as_object_mut()
        .and_then(|object| object.get_mut(field_name))
    {
        Some(password) => *password = serde_json::Value::String("********".to_owned()),
        None => return body_text.to_string(),
    }

    body.to_string()
}

async fn extract_parts_and_body_text_from_request(
    request: Request,
) -> (axum::http::request::Parts, String) {
    let (parts, body) = request.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    (parts, String::from_utf8_lossy(&body_bytes).to_string())
}

async fn extract_parts_and_body_text_from_response(
    response: Response,
) -> (axum::http::response::Parts, String) {
    let (parts, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    (parts, String::from_utf8_lossy(&body_bytes).to_string())
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {parts:#?}\nbody: {:}...",
            &body[..LOG_BODY_LENGTH_LIMIT]
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!("Received request: {parts:#?}\nbody: {body:?}");
    }
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {parts:#?}\nbody: {:}...",
            &body[..LOG_BODY_LENGTH_LIMIT]
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {parts:#?}\nbody: {body:?}");
    }
}

#[cfg(test)]
mod logging_tests {
    use super::redact_password;

    #[test]
    fn redacts_password_field() {
        let body = r#"{"email":"foo@bar.baz","password":"hunter2"}"#;

        let redacted = redact_password(body, "password");

        assert!(!redacted.contains("hunter2"));
        assert!(redacted.contains("********"));
        assert!(redacted.contains("foo@bar.baz"));
    }

    #[test]
    fn leaves_bodies_without_the_field_unchanged() {
        let body = r#"{"name":"Groceries"}"#;

        assert_eq!(redact_password(body, "password"), body);
    }

    #[test]
    fn leaves_invalid_json_unchanged() {
        let body = "this is not json";

        assert_eq!(redact_password(body, "password"), body);
    }
}
