// ABOUTME: Rule-based intent classifier turning chat messages into typed candidate actions
// ABOUTME: One ordered pattern table per intent kind, evaluated once per message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intent Classification
//!
//! Every rule in [`RULE_TABLE`] is evaluated against the message and every
//! matching kind produces an action, so "swap the squats and move it to
//! friday" yields both a substitution and a move. Confidence is a fixed
//! constant per kind; ties are left to the caller.

use super::context::ConversationContext;
use super::entities::{
    extract_dates, extract_destination_date, extract_duration, extract_equipment,
    extract_exercise_phrase, extract_focus, extract_level, extract_reason, ExerciseIndex,
};
use crate::errors::AppResult;
use chrono::NaiveDate;
use pierre_core::constants::conversation::{
    CONFIDENCE_CREATION, CONFIDENCE_MOVE, CONFIDENCE_REST_DAY, CONFIDENCE_SUBSTITUTION,
    CONFIDENCE_WORKOUT_QUERY,
};
use pierre_core::models::{DifficultyLevel, Exercise};
use pierre_intelligence::{CatalogFilter, EquipmentProfile, ExerciseCatalog};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

/// Category of a classified message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    /// "What's my workout today?"
    WorkoutQuery,
    /// "Make today a rest day"
    RestDay,
    /// "Replace the burpees"
    Substitution,
    /// "Create a 30 minute upper body workout"
    Creation,
    /// "Move tomorrow's workout to friday"
    Move,
}

impl IntentKind {
    /// Stable string form used in logs and results
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WorkoutQuery => "workout_query",
            Self::RestDay => "rest_day",
            Self::Substitution => "substitution",
            Self::Creation => "creation",
            Self::Move => "move",
        }
    }

    /// Whether executing this kind goes through a confirmation
    #[must_use]
    pub const fn requires_confirmation(&self) -> bool {
        match self {
            Self::WorkoutQuery | Self::Move => false,
            Self::RestDay | Self::Substitution | Self::Creation => true,
        }
    }

    /// Fixed confidence for this kind
    #[must_use]
    pub const fn confidence(&self) -> f64 {
        match self {
            Self::WorkoutQuery => CONFIDENCE_WORKOUT_QUERY,
            Self::RestDay => CONFIDENCE_REST_DAY,
            Self::Substitution => CONFIDENCE_SUBSTITUTION,
            Self::Creation => CONFIDENCE_CREATION,
            Self::Move => CONFIDENCE_MOVE,
        }
    }
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entities extracted for each intent kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IntentEntities {
    /// Date whose workout is asked about
    WorkoutQuery {
        /// Target date
        date: NaiveDate,
    },
    /// Date to clear
    RestDay {
        /// Target date
        date: NaiveDate,
    },
    /// Exercise to swap out
    Substitution {
        /// Date of the workout holding the exercise
        date: NaiveDate,
        /// Catalog id when a known exercise name was mentioned
        exercise_id: Option<String>,
        /// Raw phrase naming the exercise
        exercise_query: Option<String>,
        /// Why the athlete wants a change
        reason: Option<String>,
    },
    /// Parameters for a generated workout
    Creation {
        /// Date the workout is for
        date: NaiveDate,
        /// Requested minutes
        duration_minutes: Option<u32>,
        /// Focus keyword
        focus: Option<String>,
        /// Available equipment
        equipment: Option<EquipmentProfile>,
        /// Experience level
        level: Option<DifficultyLevel>,
    },
    /// Source and destination of a move
    Move {
        /// Date to move from
        from: Option<NaiveDate>,
        /// Date to move to
        to: Option<NaiveDate>,
    },
}

impl IntentEntities {
    /// The date this action is primarily about
    #[must_use]
    pub const fn primary_date(&self) -> Option<NaiveDate> {
        match self {
            Self::WorkoutQuery { date }
            | Self::RestDay { date }
            | Self::Substitution { date, .. }
            | Self::Creation { date, .. } => Some(*date),
            Self::Move { to, from } => match to {
                Some(date) => Some(*date),
                None => *from,
            },
        }
    }
}

/// A candidate action produced by classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedAction {
    /// Intent category
    pub kind: IntentKind,
    /// Extracted entities
    pub entities: IntentEntities,
    /// Fixed per-kind confidence in `[0, 1]`
    pub confidence: f64,
    /// Whether execution proposes a confirmation instead of mutating directly
    pub requires_confirmation: bool,
}

impl ClassifiedAction {
    /// Build an action with the kind's fixed confidence and confirmation flag
    #[must_use]
    pub const fn new(kind: IntentKind, entities: IntentEntities) -> Self {
        Self {
            kind,
            entities,
            confidence: kind.confidence(),
            requires_confirmation: kind.requires_confirmation(),
        }
    }
}

/// Ordered classification rules: every pattern is case-insensitive
const RULE_TABLE: &[(IntentKind, &[&str])] = &[
    (
        IntentKind::WorkoutQuery,
        &[
            r"(?i)\bwhat(?:['’]?s|\s+is|\s+are)\b.*\b(?:workout|training|exercises?|schedule|plan)\b",
            r"(?i)\b(?:show|tell|view|see|check)\b.*\b(?:workout|schedule|plan|exercises?)\b",
            r"(?i)\bdo\s+i\s+have\b.*\b(?:workout|training|session)\b",
            r"(?i)\bam\s+i\s+(?:training|working\s+out)\b",
        ],
    ),
    (
        IntentKind::RestDay,
        &[
            r"(?i)\brest\s+day\b",
            r"(?i)\bday\s+off\b",
            r"(?i)\bskip\b.*\b(?:workout|training|session|today|tomorrow)\b",
            r"(?i)\b(?:cancel|clear)\b.*\b(?:workout|training|session)\b",
        ],
    ),
    (
        IntentKind::Substitution,
        &[
            r"(?i)\b(?:replace|swap|substitute|switch)\b",
            r"(?i)\binstead\s+of\b",
            r"(?i)\bcan['’]?t\s+do\b",
            r"(?i)\balternatives?\s+(?:to|for)\b",
        ],
    ),
    (
        IntentKind::Creation,
        &[
            r"(?i)\b(?:create|generate|make|build|design|plan)\b.*\bworkout\b",
            r"(?i)\bgive\s+me\b.*\bworkout\b",
            r"(?i)\b(?:new|quick)\b.*\bworkout\b",
        ],
    ),
    (
        IntentKind::Move,
        &[
            r"(?i)\b(?:move|reschedule|shift|postpone)\b",
            r"(?i)\bpush\b.*\b(?:back|to)\b",
        ],
    ),
];

static COMPILED_RULES: LazyLock<Vec<(IntentKind, Vec<Regex>)>> = LazyLock::new(|| {
    RULE_TABLE
        .iter()
        .map(|(kind, patterns)| {
            let compiled = patterns
                .iter()
                .filter_map(|pattern| Regex::new(pattern).ok())
                .collect();
            (*kind, compiled)
        })
        .collect()
});

/// Stateless message classifier
///
/// Holds only an index of catalog exercise names used to resolve exercise
/// references; conversation state arrives through [`ConversationContext`].
#[derive(Debug, Clone, Default)]
pub struct IntentClassifier {
    exercises: ExerciseIndex,
}

impl IntentClassifier {
    /// Create a classifier that recognizes the given exercise names
    #[must_use]
    pub fn new(exercises: &[Exercise]) -> Self {
        Self {
            exercises: ExerciseIndex::new(exercises),
        }
    }

    /// Create a classifier indexing every exercise in `catalog`
    ///
    /// # Errors
    ///
    /// Returns the catalog's error if it cannot be read
    pub async fn from_catalog(catalog: &dyn ExerciseCatalog) -> AppResult<Self> {
        let exercises = catalog.search("", &CatalogFilter::default()).await?;
        Ok(Self::new(&exercises))
    }

    /// Number of indexed exercise names
    #[must_use]
    pub fn indexed_names(&self) -> usize {
        self.exercises.len()
    }

    /// Classify `message` into every matching candidate action, in rule order
    #[must_use]
    pub fn classify(&self, message: &str, ctx: &ConversationContext) -> Vec<ClassifiedAction> {
        let kinds: Vec<IntentKind> = COMPILED_RULES
            .iter()
            .filter(|(_, patterns)| patterns.iter().any(|p| p.is_match(message)))
            .map(|(kind, _)| *kind)
            .collect();
        if kinds.is_empty() {
            debug!(session_id = %ctx.session_id, "No intent rule matched");
            return Vec::new();
        }

        let dates = extract_dates(message, ctx.today);
        let first_date = dates.first().copied().unwrap_or(ctx.today);

        kinds
            .into_iter()
            .map(|kind| {
                let entities = match kind {
                    IntentKind::WorkoutQuery => IntentEntities::WorkoutQuery { date: first_date },
                    IntentKind::RestDay => IntentEntities::RestDay { date: first_date },
                    IntentKind::Substitution => IntentEntities::Substitution {
                        date: first_date,
                        exercise_id: self.exercises.find(message).map(str::to_owned),
                        exercise_query: extract_exercise_phrase(message),
                        reason: extract_reason(message),
                    },
                    IntentKind::Creation => IntentEntities::Creation {
                        date: first_date,
                        duration_minutes: extract_duration(message),
                        focus: extract_focus(message),
                        equipment: extract_equipment(message),
                        level: extract_level(message),
                    },
                    IntentKind::Move => move_entities(message, &dates, ctx),
                };
                ClassifiedAction::new(kind, entities)
            })
            .collect()
    }
}

/// Two dates are from/to. A single date is the destination only when
/// introduced as one ("to friday"); otherwise it names the workout to move
/// and the destination stays open.
fn move_entities(message: &str, dates: &[NaiveDate], ctx: &ConversationContext) -> IntentEntities {
    let fallback_from = ctx.last_referenced_date.unwrap_or(ctx.today);
    match dates {
        [] => IntentEntities::Move {
            from: Some(fallback_from),
            to: None,
        },
        [date] => {
            if extract_destination_date(message, ctx.today) == Some(*date) {
                IntentEntities::Move {
                    from: Some(fallback_from),
                    to: Some(*date),
                }
            } else {
                IntentEntities::Move {
                    from: Some(*date),
                    to: None,
                }
            }
        }
        [from, to, ..] => IntentEntities::Move {
            from: Some(*from),
            to: Some(*to),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ConversationContext {
        ConversationContext::new("unit", NaiveDate::from_ymd_opt(2025, 3, 6).unwrap())
    }

    #[test]
    fn test_every_rule_compiles() {
        assert_eq!(COMPILED_RULES.len(), RULE_TABLE.len());
        for ((_, compiled), (_, source)) in COMPILED_RULES.iter().zip(RULE_TABLE) {
            assert_eq!(compiled.len(), source.len());
        }
    }

    #[test]
    fn test_confirmation_flags() {
        assert!(!IntentKind::WorkoutQuery.requires_confirmation());
        assert!(!IntentKind::Move.requires_confirmation());
        assert!(IntentKind::RestDay.requires_confirmation());
        assert!(IntentKind::Substitution.requires_confirmation());
        assert!(IntentKind::Creation.requires_confirmation());
    }

    #[test]
    fn test_move_single_date_uses_last_reference() {
        let mut ctx = ctx();
        let friday = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        let monday = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        ctx.remember_date(friday);
        let actions = IntentClassifier::default().classify("move it to monday", &ctx);
        assert_eq!(actions.len(), 1);
        assert_eq!(
            actions[0].entities,
            IntentEntities::Move {
                from: Some(friday),
                to: Some(monday)
            }
        );
    }

    #[test]
    fn test_move_single_possessive_date_is_source() {
        let tomorrow = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        let actions = IntentClassifier::default().classify("move tomorrow's workout", &ctx());
        assert_eq!(
            actions[0].entities,
            IntentEntities::Move {
                from: Some(tomorrow),
                to: None
            }
        );
    }
}
