use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

/// Wrapper for API responses that automatically adds success envelope
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub status_code: Option<StatusCode>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful API response with default 200 status
    pub fn success(data: T) -> Self {
        Self { data, status_code: None }
    }

    pub fn with_status(data: T, status_code: StatusCode) -> Self {
        Self { data, status_code: Some(status_code) }
    }

    /// `{ "success": true, "data": ... }`
    pub fn envelope(&self) -> Result<Value, serde_json::Error> {
        Ok(json!({
            "success": true,
            "data": serde_json::to_value(&self.data)?
        }))
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);

        match self.envelope() {
            Ok(envelope) => (status, Json(envelope)).into_response(),
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "error": "Failed to serialize response data"
                    })),
                )
                    .into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::Pagination;

    #[test]
    fn wraps_data_in_envelope() {
        let response = ApiResponse::success(Pagination::default());
        assert_eq!(
            response.envelope().unwrap(),
            json!({ "success": true, "data": { "page": 1, "limit": 20 } })
        );
        assert_eq!(response.into_response().status(), StatusCode::OK);
    }

    #[test]
    fn custom_status() {
        let response = ApiResponse::with_status(json!([]), StatusCode::ACCEPTED);
        assert_eq!(response.into_response().status(), StatusCode::ACCEPTED);
    }
}
