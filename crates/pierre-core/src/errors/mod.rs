// ABOUTME: Unified error handling for the workout planner with standard error codes
// ABOUTME: Defines AppError, ErrorCode, ErrorContext and the UI-facing ErrorResponse
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every schedule, generator and confirmation operation returns [`AppResult`].
//! The [`ErrorCode`] taxonomy is intentionally small:
//!
//! - `RESOURCE_NOT_FOUND` - date, exercise or proposal absent
//! - `INVALID_MUTATION` - a mutation whose target does not exist
//! - `GENERATION_UNDERFILLED` - pool smaller than ideal (reported, never fatal)
//! - `PROPOSAL_EXPIRED` - confirmation resolved after its ttl
//! - `STORAGE_ERROR` - persistence I/O failure, operation aborted

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::{fmt, io};
use thiserror::Error;

/// Standard error codes used throughout the planner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Malformed or out-of-range input
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// A mutation references a target that does not exist
    #[serde(rename = "INVALID_MUTATION")]
    InvalidMutation = 3001,

    // Resource Management (4000-4999)
    /// Date, exercise or proposal absent
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,
    /// Proposal resolved after its ttl elapsed
    #[serde(rename = "PROPOSAL_EXPIRED")]
    ProposalExpired = 4001,

    // Generation (5000-5999)
    /// Exercise pool yielded fewer exercises than ideal
    #[serde(rename = "GENERATION_UNDERFILLED")]
    GenerationUnderfilled = 5000,

    // Configuration (6000-6999)
    /// Configuration value could not be parsed
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6000,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Persistent store I/O failure
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 9002,
    /// Data serialization/deserialization failure
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::InvalidMutation => "The requested change cannot be applied",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ProposalExpired => "The confirmation request has expired",
            Self::GenerationUnderfilled => "Fewer exercises matched than requested",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::StorageError => "Storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether retrying the same call may succeed
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::StorageError)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::InvalidMutation => "INVALID_MUTATION",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
            Self::ProposalExpired => "PROPOSAL_EXPIRED",
            Self::GenerationUnderfilled => "GENERATION_UNDERFILLED",
            Self::ConfigInvalid => "CONFIG_INVALID",
            Self::InternalError => "INTERNAL_ERROR",
            Self::StorageError => "STORAGE_ERROR",
            Self::SerializationError => "SERIALIZATION_ERROR",
        };
        f.write_str(name)
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Resource identifier (date, exercise id, proposal id)
    pub resource_id: Option<String>,
    /// Additional key-value context
    pub details: serde_json::Value,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            resource_id: None,
            details: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

/// Unified error type for the planner
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Attach a resource identifier
    #[must_use]
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.context.resource_id = Some(resource_id.into());
        self
    }

    /// Attach structured details
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.context.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Resource not found
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Mutation target missing
    pub fn invalid_mutation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidMutation, message)
    }

    /// Exercise pool smaller than the requested count
    #[must_use]
    pub fn generation_underfilled(section: &str, wanted: usize, found: usize) -> Self {
        Self::new(
            ErrorCode::GenerationUnderfilled,
            format!("{section} section wanted {wanted} exercises, found {found}"),
        )
        .with_details(serde_json::json!({
            "section": section,
            "wanted": wanted,
            "found": found,
        }))
    }

    /// Confirmation resolved past its ttl
    pub fn proposal_expired(proposal_id: impl Into<String>) -> Self {
        let id = proposal_id.into();
        Self::new(
            ErrorCode::ProposalExpired,
            format!("Proposal {id} has expired"),
        )
        .with_resource_id(id)
    }

    /// Persistence failure
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::storage(error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Error payload surfaced to the UI layer: short message plus structured kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Structured error kind
    pub code: ErrorCode,
    /// Short user-visible message
    pub message: String,
    /// Resource the error refers to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    /// Extra structured details
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self {
            code: error.code,
            message: error.message.clone(),
            resource_id: error.context.resource_id.clone(),
            details: error.context.details.clone(),
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            code: error.code,
            message: error.message,
            resource_id: error.context.resource_id,
            details: error.context.details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let error = AppError::not_found("Workout on 2025-03-04");
        assert_eq!(error.code, ErrorCode::ResourceNotFound);
        assert_eq!(error.message, "Workout on 2025-03-04 not found");
    }

    #[test]
    fn test_only_storage_errors_are_transient() {
        assert!(ErrorCode::StorageError.is_transient());
        assert!(!ErrorCode::ResourceNotFound.is_transient());
        assert!(!ErrorCode::ProposalExpired.is_transient());
    }

    #[test]
    fn test_error_response_serialization() {
        let error = AppError::generation_underfilled("main", 6, 2);
        let response = ErrorResponse::from(error);

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("GENERATION_UNDERFILLED"));
        assert!(json.contains("\"wanted\":6"));
    }
}
