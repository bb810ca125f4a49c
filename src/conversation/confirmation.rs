// ABOUTME: Confirmation broker holding session-scoped proposed actions until the athlete decides
// ABOUTME: Handlers are registered per option tag and run once when a proposal is resolved
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Confirmation Broker
//!
//! A proposal moves `Proposed -> {Confirmed, Cancelled, Expired}` and every
//! terminal state removes it. Expiry is checked against the monotonic clock
//! whenever a proposal is resolved or swept; nothing runs in the background.
//!
//! Option tags may carry a variant after a colon (`substitute_exercise:plank`).
//! Handlers are looked up by the part before the colon.

use super::context::ConversationContext;
use super::result::ActionResult;
use crate::config::ConfirmationConfig;
use crate::errors::{AppError, AppResult};
use crate::logging::PlannerLogger;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Tag of the option that dismisses a proposal
pub const CANCEL_TAG: &str = "cancel";

/// Visual weight of an option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionStyle {
    /// The suggested choice
    Primary,
    /// A neutral alternative
    Secondary,
    /// A choice that removes data
    Destructive,
}

/// One choice offered with a proposal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationOption {
    /// Button label
    pub label: String,
    /// Handler tag, optionally `action:variant`
    pub action_tag: String,
    /// Visual weight
    pub style: OptionStyle,
    /// Payload merged into the handler data
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

impl ConfirmationOption {
    /// Create an option with no payload
    pub fn new(label: impl Into<String>, action_tag: impl Into<String>, style: OptionStyle) -> Self {
        Self {
            label: label.into(),
            action_tag: action_tag.into(),
            style,
            data: Value::Null,
        }
    }

    /// The standard "Cancel" option
    #[must_use]
    pub fn cancel() -> Self {
        Self::new("Cancel", CANCEL_TAG, OptionStyle::Secondary)
    }

    /// Attach a payload
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    /// Handler name: the tag up to the first colon
    #[must_use]
    pub fn action(&self) -> &str {
        self.action_tag
            .split_once(':')
            .map_or(self.action_tag.as_str(), |(action, _)| action)
    }

    /// Variant after the colon, if any
    #[must_use]
    pub fn variant(&self) -> Option<&str> {
        self.action_tag.split_once(':').map(|(_, variant)| variant)
    }
}

/// Lifecycle state of a proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalState {
    /// Waiting for a decision
    Proposed,
    /// Resolved with a non-cancel option
    Confirmed,
    /// Resolved with the cancel option
    Cancelled,
    /// Resolved after its ttl elapsed
    Expired,
}

impl ProposalState {
    /// Stable string form used in logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Proposed => "proposed",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for ProposalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pending action awaiting the athlete's decision
#[derive(Debug, Clone)]
pub struct ProposedAction {
    /// Generated id
    pub id: String,
    /// Owning session
    pub session_id: String,
    /// Question shown to the athlete
    pub prompt: String,
    /// Offered choices
    pub options: Vec<ConfirmationOption>,
    /// Data the handlers need (dates, generated workouts)
    pub context: Value,
    /// Lifetime; `None` never expires
    pub ttl: Option<Duration>,
    /// Wall-clock creation time for display
    pub created_at: DateTime<Utc>,
    created: Instant,
    sequence: u64,
}

impl ProposedAction {
    /// Whether the ttl has elapsed at `now`
    #[must_use]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.ttl
            .is_some_and(|ttl| now.saturating_duration_since(self.created) >= ttl)
    }

    /// Whether the ttl has elapsed
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Option with exactly this tag
    #[must_use]
    pub fn option(&self, action_tag: &str) -> Option<&ConfirmationOption> {
        self.options.iter().find(|o| o.action_tag == action_tag)
    }

    /// JSON view for result payloads
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "proposal_id": self.id,
            "prompt": self.prompt,
            "options": self.options,
            "created_at": self.created_at.to_rfc3339(),
            "ttl_seconds": self.ttl.map(|ttl| ttl.as_secs()),
        })
    }
}

/// What a handler receives when its option is chosen
#[derive(Debug)]
pub struct ConfirmationRequest<'a> {
    /// The proposal being resolved (already removed from the broker)
    pub proposal: &'a ProposedAction,
    /// The chosen option
    pub option: &'a ConfirmationOption,
    /// Option payload overlaid with caller data
    pub data: Value,
}

impl ConfirmationRequest<'_> {
    /// String field from the data, falling back to the proposal context
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.data
            .get(key)
            .and_then(Value::as_str)
            .or_else(|| self.proposal.context.get(key).and_then(Value::as_str))
    }
}

/// Handler invoked for one option action
#[async_trait]
pub trait ConfirmationHandler: Send + Sync {
    /// Action name this handler answers (the tag before any colon)
    fn action(&self) -> &'static str;

    /// Apply the chosen option
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying store or catalog fails; the
    /// broker turns it into a failed result
    async fn handle(&self, request: &ConfirmationRequest<'_>) -> AppResult<ActionResult>;
}

/// Handlers by action name
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn ConfirmationHandler>>,
}

impl HandlerRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler
    ///
    /// # Returns
    ///
    /// `true` if registered, `false` if the action already has a handler
    pub fn register(&mut self, handler: Arc<dyn ConfirmationHandler>) -> bool {
        let action = handler.action().to_owned();
        if self.handlers.contains_key(&action) {
            warn!("Confirmation handler '{}' is already registered, skipping", action);
            return false;
        }
        debug!("Registering confirmation handler '{}'", action);
        self.handlers.insert(action, handler);
        true
    }

    /// Handler for `action`
    #[must_use]
    pub fn get(&self, action: &str) -> Option<&Arc<dyn ConfirmationHandler>> {
        self.handlers.get(action)
    }

    /// Whether `action` has a handler
    #[must_use]
    pub fn contains(&self, action: &str) -> bool {
        self.handlers.contains_key(action)
    }

    /// Number of handlers
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handlers are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered action names, sorted
    #[must_use]
    pub fn actions(&self) -> Vec<&str> {
        let mut actions: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        actions.sort_unstable();
        actions
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("actions", &self.actions())
            .finish()
    }
}

/// Outcome of resolving a proposal
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationOutcome {
    /// Resolved proposal
    pub proposal_id: String,
    /// Terminal state reached
    pub state: ProposalState,
    /// Handler result
    pub result: ActionResult,
}

/// Session-scoped store of pending proposals
#[derive(Debug)]
pub struct ConfirmationBroker {
    proposals: DashMap<String, ProposedAction>,
    handlers: HandlerRegistry,
    default_ttl: Option<Duration>,
    max_pending_per_session: usize,
    sequence: AtomicU64,
}

impl ConfirmationBroker {
    /// Create a broker with the given handlers and limits
    #[must_use]
    pub fn new(handlers: HandlerRegistry, config: &ConfirmationConfig) -> Self {
        Self {
            proposals: DashMap::new(),
            handlers,
            default_ttl: config.ttl,
            max_pending_per_session: config.max_pending_per_session,
            sequence: AtomicU64::new(0),
        }
    }

    /// Registered handlers
    #[must_use]
    pub const fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    /// Store a new proposal for `session_id`
    ///
    /// `ttl` overrides the configured default. When the session already holds
    /// the maximum number of proposals, its oldest one is dropped.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` when no options are given
    pub fn propose(
        &self,
        session_id: &str,
        prompt: impl Into<String>,
        options: Vec<ConfirmationOption>,
        context: Value,
        ttl: Option<Duration>,
    ) -> AppResult<ProposedAction> {
        if options.is_empty() {
            return Err(AppError::invalid_input(
                "A proposal needs at least one option",
            ));
        }

        let proposal = ProposedAction {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.to_owned(),
            prompt: prompt.into(),
            options,
            context,
            ttl: ttl.or(self.default_ttl),
            created_at: Utc::now(),
            created: Instant::now(),
            sequence: self.sequence.fetch_add(1, Ordering::Relaxed),
        };
        self.proposals.insert(proposal.id.clone(), proposal.clone());
        self.enforce_session_cap(session_id);

        PlannerLogger::log_confirmation(
            session_id,
            &proposal.id,
            ProposalState::Proposed.as_str(),
            None,
        );
        Ok(proposal)
    }

    fn enforce_session_cap(&self, session_id: &str) {
        if self.max_pending_per_session == 0 {
            return;
        }
        let mut pending: Vec<(u64, String)> = self
            .proposals
            .iter()
            .filter(|entry| entry.session_id == session_id)
            .map(|entry| (entry.sequence, entry.id.clone()))
            .collect();
        if pending.len() <= self.max_pending_per_session {
            return;
        }
        pending.sort_unstable();
        let excess = pending.len() - self.max_pending_per_session;
        for (_, id) in pending.into_iter().take(excess) {
            self.proposals.remove(&id);
            info!(
                session.id = %session_id,
                proposal.id = %id,
                "Evicted oldest pending proposal"
            );
        }
    }

    /// Resolve proposal `proposal_id` with `action_tag`
    ///
    /// The proposal is removed before its handler runs, so it is consumed
    /// whether the handler succeeds or fails. `data` overrides keys in the
    /// option payload.
    ///
    /// # Errors
    ///
    /// - `RESOURCE_NOT_FOUND` if no such proposal exists for this session
    /// - `PROPOSAL_EXPIRED` if the ttl elapsed (the proposal is removed)
    /// - `INVALID_INPUT` if the tag is not one of its options (the proposal is kept)
    /// - `INTERNAL_ERROR` if no handler is registered for the option (the proposal is kept)
    pub async fn resolve(
        &self,
        ctx: &ConversationContext,
        proposal_id: &str,
        action_tag: &str,
        data: Value,
    ) -> AppResult<ConfirmationOutcome> {
        let proposal = self
            .proposals
            .get(proposal_id)
            .map(|entry| entry.value().clone())
            .filter(|proposal| proposal.session_id == ctx.session_id)
            .ok_or_else(|| {
                AppError::not_found(format!("Proposal {proposal_id}"))
                    .with_resource_id(proposal_id)
            })?;

        if proposal.is_expired() {
            self.proposals.remove(proposal_id);
            PlannerLogger::log_confirmation(
                &ctx.session_id,
                proposal_id,
                ProposalState::Expired.as_str(),
                Some(action_tag),
            );
            return Err(AppError::proposal_expired(proposal_id));
        }

        let option = proposal.option(action_tag).cloned().ok_or_else(|| {
            let offered: Vec<&str> = proposal.options.iter().map(|o| o.action_tag.as_str()).collect();
            AppError::invalid_input(format!(
                "'{action_tag}' is not an option for this proposal"
            ))
            .with_details(json!({ "options": offered }))
        })?;

        let handler = self.handlers.get(option.action()).cloned().ok_or_else(|| {
            AppError::internal(format!(
                "No confirmation handler registered for '{}'",
                option.action()
            ))
        })?;

        if self.proposals.remove(proposal_id).is_none() {
            // Resolved concurrently by another caller
            return Err(AppError::not_found(format!("Proposal {proposal_id}"))
                .with_resource_id(proposal_id));
        }

        let state = if option.action() == CANCEL_TAG {
            ProposalState::Cancelled
        } else {
            ProposalState::Confirmed
        };
        let request = ConfirmationRequest {
            proposal: &proposal,
            option: &option,
            data: merge_data(&option.data, data),
        };
        let result = match handler.handle(&request).await {
            Ok(result) => result,
            Err(error) => {
                warn!(
                    proposal.id = %proposal_id,
                    proposal.option = %action_tag,
                    error = %error,
                    "Confirmation handler failed"
                );
                ActionResult::from_error(&error)
            }
        };

        PlannerLogger::log_confirmation(
            &ctx.session_id,
            proposal_id,
            state.as_str(),
            Some(action_tag),
        );
        Ok(ConfirmationOutcome {
            proposal_id: proposal_id.to_owned(),
            state,
            result,
        })
    }

    /// Pending proposal by id
    #[must_use]
    pub fn get(&self, proposal_id: &str) -> Option<ProposedAction> {
        self.proposals
            .get(proposal_id)
            .map(|entry| entry.value().clone())
    }

    /// Pending proposals for a session, oldest first
    #[must_use]
    pub fn pending_for_session(&self, session_id: &str) -> Vec<ProposedAction> {
        let mut pending: Vec<ProposedAction> = self
            .proposals
            .iter()
            .filter(|entry| entry.session_id == session_id)
            .map(|entry| entry.value().clone())
            .collect();
        pending.sort_by_key(|proposal| proposal.sequence);
        pending
    }

    /// Drop every expired proposal, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.proposals.len();
        self.proposals.retain(|_, proposal| !proposal.is_expired_at(now));
        let removed = before.saturating_sub(self.proposals.len());
        if removed > 0 {
            debug!(removed, "Purged expired proposals");
        }
        removed
    }

    /// Number of pending proposals across all sessions
    #[must_use]
    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    /// Whether nothing is pending
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }
}

/// Overlay `overrides` onto `base` when both are objects
fn merge_data(base: &Value, overrides: Value) -> Value {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            let mut merged: Map<String, Value> = base.clone();
            merged.extend(overrides);
            Value::Object(merged)
        }
        (base, Value::Null) => base.clone(),
        (_, overrides) => overrides,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_tag_variants() {
        let option = ConfirmationOption::new("Use plank", "substitute_exercise:plank", OptionStyle::Primary);
        assert_eq!(option.action(), "substitute_exercise");
        assert_eq!(option.variant(), Some("plank"));

        let cancel = ConfirmationOption::cancel();
        assert_eq!(cancel.action(), CANCEL_TAG);
        assert_eq!(cancel.variant(), None);
    }

    #[test]
    fn test_merge_data_prefers_caller() {
        let merged = merge_data(&json!({"a": 1, "b": 2}), json!({"b": 3}));
        assert_eq!(merged, json!({"a": 1, "b": 3}));
        assert_eq!(merge_data(&json!({"a": 1}), Value::Null), json!({"a": 1}));
        assert_eq!(merge_data(&Value::Null, json!({"c": 1})), json!({"c": 1}));
    }
}
