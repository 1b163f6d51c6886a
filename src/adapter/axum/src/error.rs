/* src/adapter/axum/src/error.rs */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gatefold_output::OutputError;

/// Newtype wrapper to implement `IntoResponse` for `OutputError`.
/// Required because Rust's orphan rule prevents `impl IntoResponse for
/// OutputError` when both types are foreign to this crate.
pub struct AxumError(pub OutputError);

impl IntoResponse for AxumError {
  fn into_response(self) -> Response {
    let err = self.0;
    let status = StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = serde_json::json!({
      "ok": false,
      "error": {
        "code": err.code(),
        "message": err.message(),
      }
    });
    (status, axum::Json(body)).into_response()
  }
}

impl From<OutputError> for AxumError {
  fn from(err: OutputError) -> Self {
    Self(err)
  }
}
