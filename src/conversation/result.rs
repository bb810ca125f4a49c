// ABOUTME: Uniform result type returned by every conversational action and confirmation
// ABOUTME: Carries a user-facing message, structured data, UI hints and an optional error kind
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Result of executing an action or resolving a confirmation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    /// Whether the action succeeded
    pub success: bool,
    /// Short user-facing message
    pub message: String,
    /// Structured payload for the UI layer
    #[serde(default)]
    pub data: Value,
    /// Rendering hints for the UI layer
    #[serde(default)]
    pub ui_hints: Value,
    /// Structured error kind when `success` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorCode>,
}

impl ActionResult {
    /// Create a successful result with just a message
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Value::Null,
            ui_hints: Value::Null,
            error: None,
        }
    }

    /// Create a failed result with an error kind
    #[must_use]
    pub fn failure(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: Value::Null,
            ui_hints: Value::Null,
            error: Some(code),
        }
    }

    /// Create a failed result from an error
    #[must_use]
    pub fn from_error(error: &AppError) -> Self {
        let result = Self::failure(error.message.clone(), error.code);
        if error.context.details.is_null() {
            result
        } else {
            result.with_data(error.context.details.clone())
        }
    }

    /// Result for a message no rule recognized
    #[must_use]
    pub fn unrecognized() -> Self {
        Self::failure(
            "I didn't understand that. Try asking about today's workout, a rest day, \
             swapping an exercise, creating a workout or moving a session.",
            ErrorCode::InvalidInput,
        )
        .with_hints(json!({ "view": "help" }))
    }

    /// Attach structured data
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    /// Attach UI hints
    #[must_use]
    pub fn with_hints(mut self, ui_hints: Value) -> Self {
        self.ui_hints = ui_hints;
        self
    }

    /// Proposal id when this result asks for confirmation
    #[must_use]
    pub fn proposal_id(&self) -> Option<&str> {
        self.data.get("proposal_id").and_then(Value::as_str)
    }

    /// True when the result is waiting on a confirmation
    #[must_use]
    pub fn awaits_confirmation(&self) -> bool {
        self.proposal_id().is_some()
    }
}

impl From<AppError> for ActionResult {
    fn from(error: AppError) -> Self {
        Self::from_error(&error)
    }
}
