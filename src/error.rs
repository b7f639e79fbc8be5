// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::auth::PasswordViolation;
use crate::filter::FilterError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    ValidationError {
        message: String,
        field_errors: Option<HashMap<String, String>>,
    },

    // 404 Not Found
    NotFound(String),

    // 422 Unprocessable Entity
    UnprocessableEntity {
        message: String,
        field_errors: HashMap<String, String>,
    },

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::ValidationError { .. } => 400,
            ApiError::NotFound(_) => 404,
            ApiError::UnprocessableEntity { .. } => 422,
            ApiError::InternalServerError(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::ValidationError { message, .. } => message,
            ApiError::NotFound(msg) => msg,
            ApiError::UnprocessableEntity { message, .. } => message,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::UnprocessableEntity { .. } => "UNPROCESSABLE_ENTITY",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn field_errors(&self) -> Option<&HashMap<String, String>> {
        match self {
            ApiError::ValidationError { field_errors, .. } => field_errors.as_ref(),
            ApiError::UnprocessableEntity { field_errors, .. } => Some(field_errors),
            _ => None,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        let mut response = json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code()
        });
        if let Some(field_errors) = self.field_errors() {
            response["field_errors"] = json!(field_errors);
        }
        response
    }
}

impl ApiError {
    pub fn validation_error(message: impl Into<String>, field_errors: Option<HashMap<String, String>>) -> Self {
        ApiError::ValidationError {
            message: message.into(),
            field_errors,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn unprocessable_entity(message: impl Into<String>, field_errors: HashMap<String, String>) -> Self {
        ApiError::UnprocessableEntity {
            message: message.into(),
            field_errors,
        }
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        match &err {
            FilterError::UnknownResource(name) => ApiError::not_found(format!("No filters defined for {}", name)),
            FilterError::UnknownFilterKey { .. }
            | FilterError::InvalidRangeOperator { .. }
            | FilterError::InvalidFilterValue { .. } => {
                let mut field_errors = HashMap::new();
                if let Some(key) = err.query_key() {
                    field_errors.insert(key.to_string(), err.to_string());
                }
                ApiError::validation_error("Invalid filter", Some(field_errors))
            }
            FilterError::InvalidFieldRule { .. }
            | FilterError::DuplicateFieldRule { .. }
            | FilterError::TableSource(_)
            | FilterError::YamlError(_) => {
                tracing::error!("Filter table error: {}", err);
                ApiError::internal_server_error("Filter configuration error")
            }
        }
    }
}

impl From<Vec<PasswordViolation>> for ApiError {
    fn from(violations: Vec<PasswordViolation>) -> Self {
        let message = violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ");
        let mut field_errors = HashMap::new();
        field_errors.insert("password".to_string(), message);
        ApiError::unprocessable_entity("Password does not meet policy", field_errors)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::ValueType;

    #[test]
    fn unknown_key_is_validation_error() {
        let err: ApiError = FilterError::UnknownFilterKey { table: "listUsers".into(), key: "bogus".into() }.into();
        assert_eq!(err.status_code(), 400);
        let body = err.to_json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["field_errors"]["bogus"], "Unknown filter key 'bogus' for listUsers");
    }

    #[test]
    fn range_and_value_errors_are_400() {
        let range: ApiError = FilterError::InvalidRangeOperator {
            key: "status".into(),
            operator: "gt".into(),
            value_type: ValueType::String,
        }
        .into();
        assert_eq!(range.status_code(), 400);

        let value: ApiError = FilterError::InvalidFilterValue {
            key: "createdAt".into(),
            value: "soon".into(),
            value_type: ValueType::Date,
        }
        .into();
        assert_eq!(value.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unknown_resource_is_404() {
        let err: ApiError = FilterError::UnknownResource("listWidgets".into()).into();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn table_errors_are_hidden() {
        let err: ApiError = FilterError::TableSource("/etc/filters.yaml: missing".into()).into();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.message(), "Filter configuration error");
    }

    #[test]
    fn password_violations_are_422() {
        let err: ApiError = vec![PasswordViolation::MissingDigit, PasswordViolation::TooShort { min: 8 }].into();
        assert_eq!(err.status_code(), 422);
        assert_eq!(
            err.to_json()["field_errors"]["password"],
            "Password must contain a digit; Password must be at least 8 characters"
        );
    }
}
