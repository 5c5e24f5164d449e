use reqwest::StatusCode;
use serde_json::Value;
use shared_types::AppError;

/// Pull a human message out of an error body: `{ "message": … }` or
/// `{ "error": … }`.
pub fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(str::to_string)
}

/// Convert a non-success response into an AppError, keeping the server's text.
pub fn status_to_app_error(status: StatusCode, body: &str) -> AppError {
    AppError::from_status(status.as_u16(), server_message(body).unwrap_or_default())
}

/// Convert a reqwest::Error into an AppError.
pub fn reqwest_to_app_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        return AppError::timeout("The server took too long to respond");
    }
    if let Some(status) = err.status() {
        return AppError::from_status(status.as_u16(), "");
    }
    if err.is_decode() {
        return AppError::internal("Unexpected response from the server");
    }
    if err.is_builder() {
        return AppError::bad_request(err.to_string());
    }
    AppError::network("Could not reach the server")
}

/// Extension trait providing `.into_app_error()` on reqwest::Error.
pub trait ReqwestErrorExt {
    fn into_app_error(self) -> AppError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_app_error(self) -> AppError {
        reqwest_to_app_error(self)
    }
}
