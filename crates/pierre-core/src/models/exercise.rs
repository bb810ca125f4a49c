// ABOUTME: Exercise definitions used by the catalog, generator and schedule
// ABOUTME: Muscle groups, equipment, categories, difficulty and rep schemes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::constants::schedule::{
    CARDIO_MINUTES_PER_SET, OTHER_MINUTES_PER_SET, STRENGTH_MINUTES_PER_SET,
};

/// Muscle group targeted by an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    /// Pectorals
    Chest,
    /// Lats, traps, rhomboids, erectors
    Back,
    /// Deltoids
    Shoulders,
    /// Biceps, triceps, forearms
    Arms,
    /// Abdominals and obliques
    Core,
    /// Quadriceps, hamstrings, calves
    Legs,
    /// Gluteal muscles
    Glutes,
    /// Compound full-body movement
    FullBody,
    /// Cardiovascular conditioning
    Cardio,
}

impl MuscleGroup {
    /// Convert to storage string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Chest => "chest",
            Self::Back => "back",
            Self::Shoulders => "shoulders",
            Self::Arms => "arms",
            Self::Core => "core",
            Self::Legs => "legs",
            Self::Glutes => "glutes",
            Self::FullBody => "full_body",
            Self::Cardio => "cardio",
        }
    }

    /// Parse a muscle group name, accepting common synonyms
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "chest" | "pecs" => Some(Self::Chest),
            "back" | "lats" => Some(Self::Back),
            "shoulders" | "shoulder" | "delts" => Some(Self::Shoulders),
            "arms" | "biceps" | "triceps" => Some(Self::Arms),
            "core" | "abs" => Some(Self::Core),
            "legs" | "quads" | "hamstrings" | "calves" => Some(Self::Legs),
            "glutes" => Some(Self::Glutes),
            "full_body" | "full body" | "total body" => Some(Self::FullBody),
            "cardio" => Some(Self::Cardio),
            _ => None,
        }
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Piece of equipment an exercise requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    /// Loaded barbell
    Barbell,
    /// Dumbbells
    Dumbbell,
    /// Kettlebell
    Kettlebell,
    /// Resistance band
    ResistanceBand,
    /// Pull-up bar
    PullUpBar,
    /// Flat or adjustable bench
    Bench,
    /// Cable stack
    Cable,
    /// Selectorized machine
    Machine,
    /// Yoga or exercise mat
    Mat,
    /// Jump rope
    JumpRope,
}

/// Exercise category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseCategory {
    /// Resistance training
    #[default]
    Strength,
    /// Conditioning work
    Cardio,
    /// Stretching and mobility
    Flexibility,
    /// Stability and balance
    Balance,
}

impl ExerciseCategory {
    /// Minutes one set of this category takes, used for duration estimates
    #[must_use]
    pub const fn minutes_per_set(&self) -> f64 {
        match self {
            Self::Cardio => CARDIO_MINUTES_PER_SET,
            Self::Strength => STRENGTH_MINUTES_PER_SET,
            Self::Flexibility | Self::Balance => OTHER_MINUTES_PER_SET,
        }
    }
}

/// Difficulty level shared by exercises, workouts and athletes
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyLevel {
    /// Suitable for beginners with no prior experience
    Beginner,
    /// Requires some training background
    #[default]
    Intermediate,
    /// For experienced athletes
    Advanced,
}

impl DifficultyLevel {
    /// Convert to storage string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Parse from string, returning `None` for unrecognized values
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" | "easy" | "novice" => Some(Self::Beginner),
            "intermediate" | "moderate" | "medium" => Some(Self::Intermediate),
            "advanced" | "hard" | "expert" => Some(Self::Advanced),
            _ => None,
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Movement tags used when balancing a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseTag {
    /// Multi-joint movement
    Compound,
    /// Single-joint movement
    Isolation,
    /// Joint mobility drill
    Mobility,
    /// Static or dynamic stretch
    Stretch,
    /// Jumping or explosive movement
    Plyometric,
}

/// Repetition prescription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RepScheme {
    /// Rep range such as 8-12
    Range {
        /// Lower bound
        min: u32,
        /// Upper bound
        max: u32,
    },
    /// Timed work such as "30 seconds"
    Duration {
        /// Human readable duration
        value: String,
    },
}

impl RepScheme {
    /// Widen the upper bound of a rep range; timed work is unchanged
    #[must_use]
    pub fn widened(&self, extra: u32) -> Self {
        match self {
            Self::Range { min, max } => Self::Range {
                min: *min,
                max: max.saturating_add(extra),
            },
            Self::Duration { value } => Self::Duration {
                value: value.clone(),
            },
        }
    }
}

impl fmt::Display for RepScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range { min, max } if min == max => write!(f, "{min}"),
            Self::Range { min, max } => write!(f, "{min}-{max}"),
            Self::Duration { value } => f.write_str(value),
        }
    }
}

/// An exercise definition, or a per-workout copy of one
///
/// Workouts hold copies because sets, reps and rest are adjusted per
/// athlete level when the workout is assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Muscle groups worked
    pub muscle_groups: BTreeSet<MuscleGroup>,
    /// Equipment required; empty means bodyweight
    pub equipment: BTreeSet<Equipment>,
    /// Exercise category
    pub category: ExerciseCategory,
    /// Difficulty level
    pub difficulty: DifficultyLevel,
    /// Movement tags
    #[serde(default)]
    pub tags: BTreeSet<ExerciseTag>,
    /// Number of sets
    pub sets: u32,
    /// Rep prescription
    pub reps: RepScheme,
    /// Rest between sets in seconds
    pub rest_seconds: u32,
    /// Optional load guidance ("bodyweight", "moderate", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_guidance: Option<String>,
    /// Estimated calories burned per minute
    pub calories_per_minute: f64,
    /// Conditions where this exercise should be avoided
    #[serde(default)]
    pub contraindications: Vec<String>,
}

impl Exercise {
    /// True when no equipment is needed
    #[must_use]
    pub fn is_bodyweight(&self) -> bool {
        self.equipment.is_empty()
    }

    /// True when the exercise carries `tag`
    #[must_use]
    pub fn has_tag(&self, tag: ExerciseTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Estimated minutes this exercise takes inside a session
    #[must_use]
    pub fn estimated_minutes(&self) -> f64 {
        f64::from(self.sets) * self.category.minutes_per_set()
    }

    /// Estimated calories for the time this exercise takes
    #[must_use]
    pub fn estimated_calories(&self) -> f64 {
        self.estimated_minutes() * self.calories_per_minute
    }

    /// Case-insensitive name fragment match
    #[must_use]
    pub fn name_matches(&self, fragment: &str) -> bool {
        let fragment = fragment.trim().to_lowercase();
        !fragment.is_empty() && self.name.to_lowercase().contains(&fragment)
    }

    /// True when any of `groups` is worked by this exercise
    #[must_use]
    pub fn targets_any(&self, groups: &BTreeSet<MuscleGroup>) -> bool {
        !self.muscle_groups.is_disjoint(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widened_range_keeps_lower_bound() {
        let reps = RepScheme::Range { min: 8, max: 12 };
        assert_eq!(reps.widened(3), RepScheme::Range { min: 8, max: 15 });
        assert_eq!(reps.widened(3).to_string(), "8-15");
    }

    #[test]
    fn test_minutes_per_set_by_category() {
        assert!((ExerciseCategory::Cardio.minutes_per_set() - 1.5).abs() < f64::EPSILON);
        assert!((ExerciseCategory::Strength.minutes_per_set() - 2.0).abs() < f64::EPSILON);
        assert!((ExerciseCategory::Balance.minutes_per_set() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_difficulty_ordering() {
        assert!(DifficultyLevel::Beginner < DifficultyLevel::Intermediate);
        assert!(DifficultyLevel::Intermediate < DifficultyLevel::Advanced);
        assert_eq!(DifficultyLevel::parse("Hard"), Some(DifficultyLevel::Advanced));
    }
}
