//! Shared response envelope for API handlers.
//!
//! All payload-carrying responses use a `{ "data": ... }` envelope.
//! [`DataResponse`] implements [`IntoResponse`], so handlers return the
//! envelope directly -- or as `(StatusCode, DataResponse<T>)` for non-200
//! statuses -- instead of wrapping every payload in `Json` at the call
//! site.

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(DataResponse::new(requests))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    /// Wrap a payload in the envelope.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> IntoResponse for DataResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serializes_under_data_key() {
        let body = serde_json::to_value(DataResponse::new(vec![1, 2, 3])).unwrap();
        assert_eq!(body, serde_json::json!({ "data": [1, 2, 3] }));
    }
}
