//! Classification of backend failures and resolution of user-facing messages.
//!
//! The message shown for a failed call is chosen in priority order: the first
//! backend field error, the backend's general message, a default derived from
//! the HTTP status, and finally a generic network message.

use bizportal_api::Error;
use serde_json::{Map, Value};

use crate::error::{FailureKind, FieldError, PortalError};

pub const NETWORK_MESSAGE: &str =
    "Network error. Please check your connection and try again.";
pub const TIMEOUT_MESSAGE: &str = "The server took too long to respond. Please try again.";
pub const APPLICATION_MESSAGE: &str = "The operation could not be completed.";

/// Keys whose value is a list or map of field errors.
const FIELD_ERROR_CONTAINERS: &[&str] = &["errors", "validationErrors", "fieldErrors", "details"];

/// Keys naming the field inside an error item.
const FIELD_NAME_KEYS: &[&str] = &["path", "field", "param", "property"];

/// Keys holding the message inside an error item.
const FIELD_MESSAGE_KEYS: &[&str] = &["msg", "message"];

/// Classifies a pipeline error and resolves its display message.
pub fn classify_error(err: Error) -> PortalError {
    let body = err.body_json();
    let field_errors = body
        .as_ref()
        .map(extract_field_errors)
        .unwrap_or_default();
    let kind = classify(&err, !field_errors.is_empty());
    let message = resolve_message(&err, body.as_ref(), &field_errors);
    PortalError::Request {
        kind,
        status: err.status(),
        message,
        field_errors,
        source: err,
    }
}

/// Like [`classify_error`], logging the failed operation first.
pub fn report(operation: &str, err: Error) -> PortalError {
    match &err {
        Error::HttpStatus { status, body } => {
            tracing::error!("{} failed with status {}: {}", operation, status, snippet(body))
        }
        other => tracing::error!("{} failed: {}", operation, other),
    }
    classify_error(err)
}

fn classify(err: &Error, has_field_errors: bool) -> FailureKind {
    match err {
        Error::Network(_) | Error::InvalidUrl(_) => FailureKind::Network,
        Error::Timeout => FailureKind::Timeout,
        Error::Application { .. } => FailureKind::Application,
        Error::Decode(_) | Error::Encode(_) => FailureKind::Other,
        Error::HttpStatus { status, .. } => match *status {
            401 => FailureKind::Unauthorized,
            403 => FailureKind::Forbidden,
            404 => FailureKind::NotFound,
            400 | 422 => FailureKind::Validation,
            s if s >= 500 && has_field_errors => FailureKind::Validation,
            s if s >= 500 => FailureKind::Server,
            _ => FailureKind::Other,
        },
    }
}

fn resolve_message(err: &Error, body: Option<&Value>, field_errors: &[FieldError]) -> String {
    if let Some(first) = field_errors.first() {
        return first.message.clone();
    }
    if let Some(message) = body.and_then(backend_message) {
        return message;
    }
    match err {
        Error::HttpStatus { status, .. } => status_message(*status),
        Error::Application { message, .. } if !message.is_empty() => message.clone(),
        Error::Application { .. } => APPLICATION_MESSAGE.to_string(),
        Error::Timeout => TIMEOUT_MESSAGE.to_string(),
        Error::Decode(_) => "The server sent an unexpected response.".to_string(),
        Error::Encode(_) => "The request could not be prepared.".to_string(),
        Error::Network(_) | Error::InvalidUrl(_) => NETWORK_MESSAGE.to_string(),
    }
}

/// Default message for an HTTP status when the backend sent none.
pub fn status_message(status: u16) -> String {
    match status {
        400 => "Invalid request. Please check your input.".to_string(),
        401 => "Your session has expired. Please log in again.".to_string(),
        403 => "You do not have permission to perform this action.".to_string(),
        404 => "The requested resource was not found.".to_string(),
        409 => "This record conflicts with an existing one.".to_string(),
        422 => "Some fields are invalid. Please review the form.".to_string(),
        s if s >= 500 => "Server error. Please try again later.".to_string(),
        s => format!("Request failed with status {}.", s),
    }
}

/// The backend's general message: `message`, `error` (string or `{message}`), or `msg`.
pub fn backend_message(body: &Value) -> Option<String> {
    let obj = body.as_object()?;
    let candidates = [
        obj.get("message"),
        obj.get("error"),
        obj.get("error").and_then(|e| e.get("message")),
        obj.get("msg"),
    ];
    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(str::to_string)
}

/// Extracts field-level errors from the shapes the backend uses.
///
/// Looks at `errors`, `validationErrors`, `fieldErrors` and `details` on the
/// body and on nested `error`/`data` objects (each either a list of
/// `{path|field|param, msg|message}` items or a `{field: message}` map), then at
/// top-level `<field>Error` string keys. The first message per field wins.
pub fn extract_field_errors(body: &Value) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = Vec::new();
    let Some(root) = body.as_object() else {
        return out;
    };

    let scopes = std::iter::once(root).chain(
        ["error", "data"]
            .iter()
            .filter_map(|key| root.get(*key).and_then(Value::as_object)),
    );
    for scope in scopes {
        for key in FIELD_ERROR_CONTAINERS {
            if let Some(container) = scope.get(*key) {
                collect_container(container, &mut out);
            }
        }
    }

    for (key, value) in root {
        let Some(field) = key.strip_suffix("Error") else {
            continue;
        };
        if field.is_empty() {
            continue;
        }
        if let Some(message) = message_of(value) {
            push_unique(&mut out, field, message);
        }
    }
    out
}

fn collect_container(container: &Value, out: &mut Vec<FieldError>) {
    match container {
        Value::Array(items) => {
            for item in items {
                if let Some(obj) = item.as_object() {
                    collect_item(obj, out);
                }
            }
        }
        Value::Object(map) => {
            for (field, value) in map {
                if let Some(message) = message_of(value) {
                    push_unique(out, field, message);
                }
            }
        }
        _ => {}
    }
}

fn collect_item(item: &Map<String, Value>, out: &mut Vec<FieldError>) {
    let field = FIELD_NAME_KEYS
        .iter()
        .find_map(|key| item.get(*key).and_then(field_name));
    let message = FIELD_MESSAGE_KEYS
        .iter()
        .find_map(|key| item.get(*key).and_then(message_of));
    if let (Some(field), Some(message)) = (field, message) {
        push_unique(out, &field, message);
    }
}

/// Field names are strings, or path segments like `["address", "city"]`.
fn field_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(parts) => {
            let parts: Vec<String> = parts
                .iter()
                .filter_map(|p| match p {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect();
            (!parts.is_empty()).then(|| parts.join("."))
        }
        _ => None,
    }
}

/// A message is a non-empty string, the first string of a list, or an object's `message`.
fn message_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Array(items) => items.iter().find_map(message_of),
        Value::Object(obj) => FIELD_MESSAGE_KEYS
            .iter()
            .find_map(|key| obj.get(*key).and_then(message_of)),
        _ => None,
    }
}

fn push_unique(out: &mut Vec<FieldError>, field: &str, message: String) {
    if out.iter().any(|e| e.field == field) {
        return;
    }
    out.push(FieldError {
        field: field.to_string(),
        message,
    });
}

fn snippet(body: &str) -> &str {
    const MAX: usize = 500;
    if body.len() <= MAX {
        return body;
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
