use thiserror::Error;

use super::types::ValueType;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Unknown filter resource: {0}")]
    UnknownResource(String),

    #[error("Unknown filter key '{key}' for {table}")]
    UnknownFilterKey { table: String, key: String },

    #[error("Range operator '{operator}' is not allowed on {value_type} field '{key}'")]
    InvalidRangeOperator {
        key: String,
        operator: String,
        value_type: ValueType,
    },

    #[error("Invalid value '{value}' for {value_type} field '{key}'")]
    InvalidFilterValue {
        key: String,
        value: String,
        value_type: ValueType,
    },

    #[error("Invalid field rule '{key}' in {table}: {reason}")]
    InvalidFieldRule {
        table: String,
        key: String,
        reason: String,
    },

    #[error("Duplicate field rule '{key}' in {table}")]
    DuplicateFieldRule { table: String, key: String },

    #[error("Failed to load filter tables: {0}")]
    TableSource(String),

    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl FilterError {
    /// Query key the error refers to, if it came from a request
    pub fn query_key(&self) -> Option<&str> {
        match self {
            FilterError::UnknownFilterKey { key, .. }
            | FilterError::InvalidRangeOperator { key, .. }
            | FilterError::InvalidFilterValue { key, .. } => Some(key),
            _ => None,
        }
    }

    /// True for errors caused by the request rather than the table definitions
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            FilterError::UnknownResource(_)
                | FilterError::UnknownFilterKey { .. }
                | FilterError::InvalidRangeOperator { .. }
                | FilterError::InvalidFilterValue { .. }
        )
    }
}
