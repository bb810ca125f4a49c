// ABOUTME: Declarative workout template library and the pure template scoring function
// ABOUTME: Selects the best template for a requirement or synthesizes one from the focus text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::constants::generation::{
    COOLDOWN_MAX_MINUTES, COOLDOWN_MIN_MINUTES, COOLDOWN_SHARE, DURATION_CLOSE_MINUTES,
    DURATION_NEAR_MINUTES, MIN_TEMPLATE_SCORE, SCORE_DIFFICULTY_MATCH, SCORE_DURATION_CLOSE,
    SCORE_DURATION_NEAR, SCORE_FOCUS_MATCH, WARMUP_MAX_MINUTES, WARMUP_MIN_MINUTES, WARMUP_SHARE,
};
use pierre_core::models::{DifficultyLevel, MuscleGroup, WorkoutType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::WorkoutRequirement;

/// Section of a workout skeleton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Low-intensity preparation
    WarmUp,
    /// Primary working sets
    Main,
    /// Secondary working sets
    Accessory,
    /// Low-intensity wind-down
    CoolDown,
}

impl SectionKind {
    /// Human readable name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WarmUp => "warm-up",
            Self::Main => "main",
            Self::Accessory => "accessory",
            Self::CoolDown => "cool-down",
        }
    }
}

/// A section and its minute budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSection {
    /// Section kind
    pub kind: SectionKind,
    /// Minutes allotted
    pub minutes: u32,
}

/// Named reusable workout skeleton
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTemplate {
    /// Template name, used as the workout title
    pub name: String,
    /// Session type
    pub workout_type: WorkoutType,
    /// Intended difficulty
    pub difficulty: DifficultyLevel,
    /// Declared total duration in minutes
    pub duration_minutes: u32,
    /// Muscle groups the template trains
    pub target_groups: BTreeSet<MuscleGroup>,
    /// Section skeleton in order
    pub sections: Vec<TemplateSection>,
}

impl WorkoutTemplate {
    /// Minutes allotted to `kind`, scaled to a `total` duration
    ///
    /// Library templates declare budgets for their own duration; a request for
    /// a different length scales each budget proportionally.
    #[must_use]
    pub fn section_minutes(&self, kind: SectionKind, total: u32) -> u32 {
        let declared: u32 = self
            .sections
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| s.minutes)
            .sum();
        if self.duration_minutes == 0 || declared == 0 {
            return 0;
        }
        let scaled = f64::from(declared) * f64::from(total) / f64::from(self.duration_minutes);
        scaled.round() as u32
    }

    /// True for templates whose main work is conditioning
    #[must_use]
    pub const fn is_conditioning(&self) -> bool {
        matches!(self.workout_type, WorkoutType::Hiit | WorkoutType::Cardio)
    }

    /// True for templates whose main work is stretching or yoga
    #[must_use]
    pub const fn is_mobility(&self) -> bool {
        matches!(
            self.workout_type,
            WorkoutType::Yoga | WorkoutType::Flexibility
        )
    }
}

// ============================================================================
// Template Library
// ============================================================================

struct TemplateData {
    name: &'static str,
    workout_type: WorkoutType,
    difficulty: DifficultyLevel,
    duration_minutes: u32,
    target_groups: &'static [MuscleGroup],
    // warm-up, main, accessory, cool-down
    sections: [u32; 4],
}

const TEMPLATE_LIBRARY: &[TemplateData] = &[
    TemplateData {
        name: "Upper Body Strength",
        workout_type: WorkoutType::Strength,
        difficulty: DifficultyLevel::Intermediate,
        duration_minutes: 45,
        target_groups: &[
            MuscleGroup::Chest,
            MuscleGroup::Back,
            MuscleGroup::Shoulders,
            MuscleGroup::Arms,
        ],
        sections: [5, 25, 10, 5],
    },
    TemplateData {
        name: "Lower Body Power",
        workout_type: WorkoutType::Strength,
        difficulty: DifficultyLevel::Intermediate,
        duration_minutes: 45,
        target_groups: &[MuscleGroup::Legs, MuscleGroup::Glutes, MuscleGroup::Core],
        sections: [5, 25, 10, 5],
    },
    TemplateData {
        name: "Full Body Strength",
        workout_type: WorkoutType::Strength,
        difficulty: DifficultyLevel::Intermediate,
        duration_minutes: 60,
        target_groups: &[
            MuscleGroup::FullBody,
            MuscleGroup::Legs,
            MuscleGroup::Chest,
            MuscleGroup::Back,
        ],
        sections: [8, 35, 12, 5],
    },
    TemplateData {
        name: "Beginner Full Body",
        workout_type: WorkoutType::Strength,
        difficulty: DifficultyLevel::Beginner,
        duration_minutes: 30,
        target_groups: &[
            MuscleGroup::FullBody,
            MuscleGroup::Legs,
            MuscleGroup::Chest,
            MuscleGroup::Core,
        ],
        sections: [5, 20, 0, 5],
    },
    TemplateData {
        name: "Push Day",
        workout_type: WorkoutType::Strength,
        difficulty: DifficultyLevel::Advanced,
        duration_minutes: 60,
        target_groups: &[MuscleGroup::Chest, MuscleGroup::Shoulders, MuscleGroup::Arms],
        sections: [8, 35, 12, 5],
    },
    TemplateData {
        name: "Pull Day",
        workout_type: WorkoutType::Strength,
        difficulty: DifficultyLevel::Advanced,
        duration_minutes: 60,
        target_groups: &[MuscleGroup::Back, MuscleGroup::Arms],
        sections: [8, 35, 12, 5],
    },
    TemplateData {
        name: "HIIT Cardio Blast",
        workout_type: WorkoutType::Hiit,
        difficulty: DifficultyLevel::Intermediate,
        duration_minutes: 30,
        target_groups: &[MuscleGroup::Cardio, MuscleGroup::FullBody],
        sections: [5, 20, 0, 5],
    },
    TemplateData {
        name: "Metabolic Conditioning",
        workout_type: WorkoutType::Hiit,
        difficulty: DifficultyLevel::Advanced,
        duration_minutes: 45,
        target_groups: &[MuscleGroup::Cardio, MuscleGroup::FullBody, MuscleGroup::Legs],
        sections: [6, 32, 0, 7],
    },
    TemplateData {
        name: "Core & Stability",
        workout_type: WorkoutType::Strength,
        difficulty: DifficultyLevel::Beginner,
        duration_minutes: 20,
        target_groups: &[MuscleGroup::Core],
        sections: [3, 14, 0, 3],
    },
    TemplateData {
        name: "Yoga & Mobility Flow",
        workout_type: WorkoutType::Yoga,
        difficulty: DifficultyLevel::Beginner,
        duration_minutes: 30,
        target_groups: &[MuscleGroup::FullBody, MuscleGroup::Back, MuscleGroup::Legs],
        sections: [5, 20, 0, 5],
    },
];

const SECTION_ORDER: [SectionKind; 4] = [
    SectionKind::WarmUp,
    SectionKind::Main,
    SectionKind::Accessory,
    SectionKind::CoolDown,
];

impl TemplateData {
    fn to_template(&self) -> WorkoutTemplate {
        WorkoutTemplate {
            name: self.name.to_owned(),
            workout_type: self.workout_type,
            difficulty: self.difficulty,
            duration_minutes: self.duration_minutes,
            target_groups: self.target_groups.iter().copied().collect(),
            sections: SECTION_ORDER
                .iter()
                .zip(self.sections)
                .filter(|(_, minutes)| *minutes > 0)
                .map(|(kind, minutes)| TemplateSection {
                    kind: *kind,
                    minutes,
                })
                .collect(),
        }
    }
}

/// Templates shipped with the planner, in tie-breaking order
#[must_use]
pub fn template_library() -> Vec<WorkoutTemplate> {
    TEMPLATE_LIBRARY.iter().map(TemplateData::to_template).collect()
}

// ============================================================================
// Focus Parsing
// ============================================================================

/// Keyword -> muscle groups table for focus text
const FOCUS_KEYWORDS: &[(&str, &[MuscleGroup])] = &[
    (
        "upper",
        &[
            MuscleGroup::Chest,
            MuscleGroup::Back,
            MuscleGroup::Shoulders,
            MuscleGroup::Arms,
        ],
    ),
    ("lower", &[MuscleGroup::Legs, MuscleGroup::Glutes]),
    ("leg", &[MuscleGroup::Legs, MuscleGroup::Glutes]),
    ("glute", &[MuscleGroup::Glutes]),
    ("chest", &[MuscleGroup::Chest]),
    ("push", &[MuscleGroup::Chest, MuscleGroup::Shoulders, MuscleGroup::Arms]),
    ("back", &[MuscleGroup::Back]),
    ("pull", &[MuscleGroup::Back, MuscleGroup::Arms]),
    ("shoulder", &[MuscleGroup::Shoulders]),
    ("arm", &[MuscleGroup::Arms]),
    ("core", &[MuscleGroup::Core]),
    ("abs", &[MuscleGroup::Core]),
    ("full body", &[MuscleGroup::FullBody]),
    ("total body", &[MuscleGroup::FullBody]),
    ("cardio", &[MuscleGroup::Cardio]),
    ("hiit", &[MuscleGroup::Cardio, MuscleGroup::FullBody]),
    ("conditioning", &[MuscleGroup::Cardio]),
];

const CONDITIONING_KEYWORDS: &[&str] = &["cardio", "hiit", "conditioning", "interval"];
const MOBILITY_KEYWORDS: &[&str] = &["yoga", "stretch", "mobility", "flexibility"];

/// What a free-text focus asks for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusIntent {
    /// Muscle groups named or implied by the text
    pub groups: BTreeSet<MuscleGroup>,
    /// Text asks for conditioning work
    pub wants_conditioning: bool,
    /// Text asks for stretching or yoga
    pub wants_mobility: bool,
}

impl FocusIntent {
    /// Parse focus text by keyword lookup
    #[must_use]
    pub fn parse(focus: &str) -> Self {
        let focus = focus.to_lowercase();
        let groups = FOCUS_KEYWORDS
            .iter()
            .filter(|(keyword, _)| focus.contains(keyword))
            .flat_map(|(_, groups)| groups.iter().copied())
            .collect();
        Self {
            groups,
            wants_conditioning: CONDITIONING_KEYWORDS.iter().any(|k| focus.contains(k)),
            wants_mobility: MOBILITY_KEYWORDS.iter().any(|k| focus.contains(k)),
        }
    }
}

/// Muscle groups inferred from focus text, defaulting to full body
#[must_use]
pub fn infer_target_groups(focus: &str) -> BTreeSet<MuscleGroup> {
    let intent = FocusIntent::parse(focus);
    if intent.groups.is_empty() {
        BTreeSet::from([MuscleGroup::FullBody])
    } else {
        intent.groups
    }
}

// ============================================================================
// Scoring
// ============================================================================

fn focus_aligns(template: &WorkoutTemplate, intent: &FocusIntent) -> bool {
    if intent.wants_conditioning {
        return template.is_conditioning();
    }
    if intent.wants_mobility {
        return template.is_mobility();
    }
    !intent.groups.is_disjoint(&template.target_groups)
}

/// Score how well `template` fits `requirement`
///
/// +3 when the declared duration is within 10 minutes of the request (+1
/// within 20), +2 for an exact difficulty match, +3 when the focus text
/// aligns with the template's targets or type.
#[must_use]
pub fn score_template(template: &WorkoutTemplate, requirement: &WorkoutRequirement) -> u32 {
    let mut score = 0;

    let gap = template
        .duration_minutes
        .abs_diff(requirement.duration_minutes);
    if gap <= DURATION_CLOSE_MINUTES {
        score += SCORE_DURATION_CLOSE;
    } else if gap <= DURATION_NEAR_MINUTES {
        score += SCORE_DURATION_NEAR;
    }

    if template.difficulty == requirement.experience_level {
        score += SCORE_DIFFICULTY_MATCH;
    }

    if focus_aligns(template, &FocusIntent::parse(&requirement.focus_area)) {
        score += SCORE_FOCUS_MATCH;
    }

    score
}

/// Build a template for a request no library template fits
#[must_use]
pub fn synthesize_template(requirement: &WorkoutRequirement) -> WorkoutTemplate {
    let total = requirement.duration_minutes;
    let intent = FocusIntent::parse(&requirement.focus_area);

    let warm_up = ((f64::from(total) * WARMUP_SHARE).round() as u32)
        .clamp(WARMUP_MIN_MINUTES, WARMUP_MAX_MINUTES);
    let cool_down = ((f64::from(total) * COOLDOWN_SHARE).round() as u32)
        .clamp(COOLDOWN_MIN_MINUTES, COOLDOWN_MAX_MINUTES);
    let main = total.saturating_sub(warm_up + cool_down);

    let workout_type = if intent.wants_conditioning {
        WorkoutType::Hiit
    } else if intent.wants_mobility {
        WorkoutType::Yoga
    } else {
        WorkoutType::Strength
    };

    let focus = requirement.focus_area.trim();
    let name = if focus.is_empty() {
        "Custom Workout".to_owned()
    } else {
        format!("Custom {} Workout", title_case(focus))
    };

    WorkoutTemplate {
        name,
        workout_type,
        difficulty: requirement.experience_level,
        duration_minutes: total,
        target_groups: infer_target_groups(&requirement.focus_area),
        sections: vec![
            TemplateSection {
                kind: SectionKind::WarmUp,
                minutes: warm_up,
            },
            TemplateSection {
                kind: SectionKind::Main,
                minutes: main,
            },
            TemplateSection {
                kind: SectionKind::CoolDown,
                minutes: cool_down,
            },
        ],
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Outcome of template selection
#[derive(Debug, Clone)]
pub struct TemplateChoice {
    /// Chosen or synthesized template
    pub template: WorkoutTemplate,
    /// Score of the best library template
    pub score: u32,
    /// True when no library template scored high enough
    pub synthesized: bool,
}

/// Pick the highest-scoring template, first in library order on ties
///
/// Falls back to [`synthesize_template`] when the best score is below 3.
#[must_use]
pub fn select_template(
    library: &[WorkoutTemplate],
    requirement: &WorkoutRequirement,
) -> TemplateChoice {
    let mut best: Option<(&WorkoutTemplate, u32)> = None;
    for template in library {
        let score = score_template(template, requirement);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((template, score)),
        }
    }

    match best {
        Some((template, score)) if score >= MIN_TEMPLATE_SCORE => TemplateChoice {
            template: template.clone(),
            score,
            synthesized: false,
        },
        other => TemplateChoice {
            template: synthesize_template(requirement),
            score: other.map_or(0, |(_, score)| score),
            synthesized: true,
        },
    }
}
