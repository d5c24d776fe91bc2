/// Service-level error types
///
/// Every service operation returns [`ServiceResult`]. The variants form a
/// closed taxonomy that the API layer maps 1:1 onto HTTP status codes.
///
/// `NotFound` is deliberately used both for records that do not exist and
/// for records owned by another user, so callers cannot probe for foreign
/// data.

use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use crate::store::StoreError;

/// Result alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// A single field that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name as it appears in the request payload
    pub field: String,

    /// Human-readable message
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error type shared by all services
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A required field is missing or a field value is invalid
    #[error("Validation failed: {} errors", .0.len())]
    Validation(Vec<FieldError>),

    /// Entity is absent or not owned by the requester
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Malformed pagination or filter parameters
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Uniqueness violation (e.g. duplicate email)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Credentials were rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Persistence failure
    #[error("Storage error: {0}")]
    Storage(#[source] StoreError),

    /// Hashing or token signing failed
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Shorthand for a single-field validation failure
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ServiceError::Validation(vec![FieldError::new(field, message)])
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(msg) => ServiceError::Conflict(msg),
            other => ServiceError::Storage(other),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        let mut details: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| FieldError {
                    field: to_camel_case(field),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();

        // HashMap iteration order is random
        details.sort_by(|a, b| a.field.cmp(&b.field));
        ServiceError::Validation(details)
    }
}

/// Maps a Rust field name onto the camelCase key used on the wire
fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "Title is required"))]
        title: String,
        #[validate(length(max = 3, message = "Too long"))]
        due_date: String,
    }

    #[test]
    fn test_validation_errors_are_flattened_and_sorted() {
        let sample = Sample {
            title: String::new(),
            due_date: "abcdef".to_string(),
        };

        let err: ServiceError = sample.validate().unwrap_err().into();
        match err {
            ServiceError::Validation(details) => {
                assert_eq!(
                    details,
                    vec![
                        FieldError::new("dueDate", "Too long"),
                        FieldError::new("title", "Title is required"),
                    ]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_store_conflict_becomes_service_conflict() {
        let err: ServiceError = StoreError::Conflict("Email already exists".into()).into();
        assert!(matches!(err, ServiceError::Conflict(msg) if msg == "Email already exists"));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(ServiceError::NotFound("Project").to_string(), "Project not found");
        assert_eq!(
            ServiceError::invalid_field("title", "Title is required").to_string(),
            "Validation failed: 1 errors"
        );
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("project_id"), "projectId");
        assert_eq!(to_camel_case("title"), "title");
    }
}
