// ABOUTME: Explicit per-session conversation context passed into classify, execute and resolve
// ABOUTME: Holds the session id, the reference date for relative phrases, and the last date discussed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Conversation state owned by the caller
///
/// `today` anchors relative phrases like "tomorrow" or "friday", which keeps
/// classification deterministic under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationContext {
    /// Session the proposals belong to
    pub session_id: String,
    /// Reference date for relative phrases
    pub today: NaiveDate,
    /// Last date an action referred to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_referenced_date: Option<NaiveDate>,
}

impl ConversationContext {
    /// Create a context for `session_id` anchored at `today`
    pub fn new(session_id: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            session_id: session_id.into(),
            today,
            last_referenced_date: None,
        }
    }

    /// Create a fresh session anchored at the local calendar date
    #[must_use]
    pub fn new_session() -> Self {
        Self::new(Uuid::new_v4().to_string(), Local::now().date_naive())
    }

    /// Record the date an action referred to
    pub fn remember_date(&mut self, date: NaiveDate) {
        self.last_referenced_date = Some(date);
    }
}
