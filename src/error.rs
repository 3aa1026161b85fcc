use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::validation::Violation;

/// Failures raised before a request reaches a resource service.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("No route for {0}")]
    NotFound(String),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(err) => {
                tracing::error!(error = %err, "internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorStack::from(ErrorEntry::relation(self.to_string()));
        (status, Json(body)).into_response()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A field failed a rule of the active rule group.
    Validation,
    /// A relation or ownership check refused the call.
    Relation,
    /// The storage layer rejected the operation.
    Persistence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ErrorEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    pub message: String,
    #[serde(skip)]
    pub kind: ErrorKind,
}

impl ErrorEntry {
    pub fn field(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            property: Some(property.into()),
            message: message.into(),
            kind: ErrorKind::Validation,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            property: None,
            message: message.into(),
            kind: ErrorKind::Validation,
        }
    }

    pub fn relation(message: impl Into<String>) -> Self {
        Self {
            property: None,
            message: message.into(),
            kind: ErrorKind::Relation,
        }
    }

    pub fn persistence(err: impl fmt::Display) -> Self {
        Self {
            property: None,
            message: err.to_string(),
            kind: ErrorKind::Persistence,
        }
    }
}

impl From<Violation> for ErrorEntry {
    fn from(violation: Violation) -> Self {
        ErrorEntry::field(violation.property, violation.message)
    }
}

/// Ordered failures collected during one lifecycle call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ErrorStack(Vec<ErrorEntry>);

impl ErrorStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps validator order and duplicates.
    pub fn from_violations(violations: impl IntoIterator<Item = Violation>) -> Self {
        Self(violations.into_iter().map(ErrorEntry::from).collect())
    }

    pub fn push(&mut self, entry: ErrorEntry) {
        self.0.push(entry);
    }

    pub fn entries(&self) -> &[ErrorEntry] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn has_property(&self, property: &str) -> bool {
        self.0
            .iter()
            .any(|entry| entry.property.as_deref() == Some(property))
    }
}

impl From<ErrorEntry> for ErrorStack {
    fn from(entry: ErrorEntry) -> Self {
        Self(vec![entry])
    }
}

impl fmt::Display for ErrorStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .0
            .iter()
            .map(|entry| match &entry.property {
                Some(property) => format!("{property}: {}", entry.message),
                None => entry.message.clone(),
            })
            .collect();
        f.write_str(&messages.join("; "))
    }
}

pub type ServiceResult<T> = Result<T, ErrorStack>;

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(property: &str, message: &str) -> Violation {
        Violation {
            property: property.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn violations_keep_order_and_duplicates() {
        let stack = ErrorStack::from_violations(vec![
            violation("name", "too short"),
            violation("price", "must be positive"),
            violation("name", "too short"),
        ]);

        let properties: Vec<_> = stack
            .entries()
            .iter()
            .map(|entry| entry.property.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(properties, ["name", "price", "name"]);
        assert!(stack.entries().iter().all(|e| e.kind == ErrorKind::Validation));
    }

    #[test]
    fn relation_and_persistence_entries_omit_property() {
        let mut stack = ErrorStack::from(ErrorEntry::relation("Cannot edit this entity!"));
        stack.push(ErrorEntry::persistence("connection reset"));

        let json = serde_json::to_value(&stack).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "message": "Cannot edit this entity!" },
                { "message": "connection reset" }
            ])
        );
    }

    #[test]
    fn field_entries_serialize_property_and_message() {
        let stack = ErrorStack::from(ErrorEntry::field("ean", "This value is not a valid ISBN-13."));
        let json = serde_json::to_value(&stack).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "property": "ean", "message": "This value is not a valid ISBN-13." }])
        );
        assert!(stack.has_property("ean"));
    }

    #[test]
    fn display_joins_entries_in_order() {
        let mut stack = ErrorStack::from(ErrorEntry::field("name", "too short"));
        stack.push(ErrorEntry::relation("Product not exists"));
        assert_eq!(stack.to_string(), "name: too short; Product not exists");
    }
}
