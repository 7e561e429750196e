//! Flat success/failure results for UI collaborators.

use crate::errors::{ErrorKind, Result};
use serde::Serialize;

/// `{ success, data, errorKind, message }` view of a [`Result`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationOutcome<T> {
    /// `true` when the operation completed
    pub success: bool,
    /// The operation's value on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Classification of the failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    /// Human-readable failure description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> OperationOutcome<T> {
    /// Wraps a result; failures carry their kind and display message.
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self {
                success: true,
                data: Some(data),
                error_kind: None,
                message: None,
            },
            Err(err) => Self {
                success: false,
                data: None,
                error_kind: Some(err.kind()),
                message: Some(err.to_string()),
            },
        }
    }
}

impl<T> From<Result<T>> for OperationOutcome<T> {
    fn from(result: Result<T>) -> Self {
        Self::from_result(result)
    }
}
