// ABOUTME: Built-in exercise library seeding the in-memory catalog
// ABOUTME: Covers warm-up mobility, compound and isolation strength, and conditioning work
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::models::{
    DifficultyLevel, Equipment, Exercise, ExerciseCategory, ExerciseTag, MuscleGroup, RepScheme,
};

use DifficultyLevel::{Advanced, Beginner, Intermediate};
use Equipment::{
    Barbell, Bench, Cable, Dumbbell, JumpRope, Kettlebell, Machine, Mat, PullUpBar,
    ResistanceBand,
};
use ExerciseCategory::{Balance, Cardio, Flexibility, Strength};
use ExerciseTag::{Compound, Isolation, Mobility, Plyometric, Stretch};
use MuscleGroup::{Arms, Back, Chest, Core, FullBody, Glutes, Legs, Shoulders};

enum Reps {
    Range(u32, u32),
    Timed(&'static str),
}

struct ExerciseData {
    id: &'static str,
    name: &'static str,
    groups: &'static [MuscleGroup],
    equipment: &'static [Equipment],
    category: ExerciseCategory,
    difficulty: DifficultyLevel,
    tags: &'static [ExerciseTag],
    sets: u32,
    reps: Reps,
    rest_seconds: u32,
    weight: Option<&'static str>,
    calories_per_minute: f64,
    contraindications: &'static [&'static str],
}

const EXERCISE_LIBRARY: &[ExerciseData] = &[
    // Warm-up and mobility
    ExerciseData {
        id: "arm-circles",
        name: "Arm Circles",
        groups: &[Shoulders],
        equipment: &[],
        category: Flexibility,
        difficulty: Beginner,
        tags: &[Mobility],
        sets: 2,
        reps: Reps::Timed("30 seconds"),
        rest_seconds: 15,
        weight: None,
        calories_per_minute: 3.0,
        contraindications: &[],
    },
    ExerciseData {
        id: "leg-swings",
        name: "Leg Swings",
        groups: &[Legs, Glutes],
        equipment: &[],
        category: Flexibility,
        difficulty: Beginner,
        tags: &[Mobility],
        sets: 2,
        reps: Reps::Range(10, 15),
        rest_seconds: 15,
        weight: None,
        calories_per_minute: 3.0,
        contraindications: &[],
    },
    ExerciseData {
        id: "cat-cow",
        name: "Cat-Cow Stretch",
        groups: &[Back, Core],
        equipment: &[Mat],
        category: Flexibility,
        difficulty: Beginner,
        tags: &[Mobility, Stretch],
        sets: 2,
        reps: Reps::Range(8, 10),
        rest_seconds: 15,
        weight: None,
        calories_per_minute: 2.5,
        contraindications: &[],
    },
    ExerciseData {
        id: "worlds-greatest-stretch",
        name: "World's Greatest Stretch",
        groups: &[FullBody, Legs, Glutes],
        equipment: &[],
        category: Flexibility,
        difficulty: Intermediate,
        tags: &[Mobility, Stretch],
        sets: 2,
        reps: Reps::Range(5, 6),
        rest_seconds: 20,
        weight: None,
        calories_per_minute: 3.5,
        contraindications: &[],
    },
    ExerciseData {
        id: "hip-circles",
        name: "Hip Circles",
        groups: &[Glutes, Legs],
        equipment: &[],
        category: Flexibility,
        difficulty: Beginner,
        tags: &[Mobility],
        sets: 2,
        reps: Reps::Range(10, 10),
        rest_seconds: 15,
        weight: None,
        calories_per_minute: 2.5,
        contraindications: &[],
    },
    ExerciseData {
        id: "bird-dog",
        name: "Bird Dog",
        groups: &[Core, Back],
        equipment: &[Mat],
        category: Balance,
        difficulty: Beginner,
        tags: &[Mobility],
        sets: 2,
        reps: Reps::Range(8, 10),
        rest_seconds: 30,
        weight: None,
        calories_per_minute: 3.5,
        contraindications: &[],
    },
    ExerciseData {
        id: "downward-dog",
        name: "Downward Dog",
        groups: &[Shoulders, Legs, Back],
        equipment: &[Mat],
        category: Flexibility,
        difficulty: Beginner,
        tags: &[Stretch, Mobility],
        sets: 2,
        reps: Reps::Timed("45 seconds"),
        rest_seconds: 15,
        weight: None,
        calories_per_minute: 3.0,
        contraindications: &["wrist"],
    },
    // Cool-down stretches
    ExerciseData {
        id: "childs-pose",
        name: "Child's Pose",
        groups: &[Back, Shoulders],
        equipment: &[Mat],
        category: Flexibility,
        difficulty: Beginner,
        tags: &[Stretch],
        sets: 1,
        reps: Reps::Timed("60 seconds"),
        rest_seconds: 0,
        weight: None,
        calories_per_minute: 1.5,
        contraindications: &["knee_injury"],
    },
    ExerciseData {
        id: "hamstring-stretch",
        name: "Standing Hamstring Stretch",
        groups: &[Legs],
        equipment: &[],
        category: Flexibility,
        difficulty: Beginner,
        tags: &[Stretch],
        sets: 2,
        reps: Reps::Timed("30 seconds"),
        rest_seconds: 10,
        weight: None,
        calories_per_minute: 1.5,
        contraindications: &[],
    },
    ExerciseData {
        id: "doorway-chest-stretch",
        name: "Doorway Chest Stretch",
        groups: &[Chest, Shoulders],
        equipment: &[],
        category: Flexibility,
        difficulty: Beginner,
        tags: &[Stretch],
        sets: 2,
        reps: Reps::Timed("30 seconds"),
        rest_seconds: 10,
        weight: None,
        calories_per_minute: 1.5,
        contraindications: &["shoulder_injury"],
    },
    ExerciseData {
        id: "pigeon-pose",
        name: "Pigeon Pose",
        groups: &[Glutes, Legs],
        equipment: &[Mat],
        category: Flexibility,
        difficulty: Intermediate,
        tags: &[Stretch],
        sets: 1,
        reps: Reps::Timed("60 seconds"),
        rest_seconds: 0,
        weight: None,
        calories_per_minute: 1.5,
        contraindications: &["knee_injury"],
    },
    // Compound strength
    ExerciseData {
        id: "push-up",
        name: "Push-Up",
        groups: &[Chest, Shoulders, Arms],
        equipment: &[],
        category: Strength,
        difficulty: Beginner,
        tags: &[Compound],
        sets: 3,
        reps: Reps::Range(10, 15),
        rest_seconds: 60,
        weight: Some("bodyweight"),
        calories_per_minute: 7.0,
        contraindications: &["wrist"],
    },
    ExerciseData {
        id: "pull-up",
        name: "Pull-Up",
        groups: &[Back, Arms],
        equipment: &[PullUpBar],
        category: Strength,
        difficulty: Intermediate,
        tags: &[Compound],
        sets: 3,
        reps: Reps::Range(6, 10),
        rest_seconds: 90,
        weight: Some("bodyweight"),
        calories_per_minute: 8.0,
        contraindications: &["shoulder_injury"],
    },
    ExerciseData {
        id: "barbell-bench-press",
        name: "Barbell Bench Press",
        groups: &[Chest, Shoulders, Arms],
        equipment: &[Barbell, Bench],
        category: Strength,
        difficulty: Intermediate,
        tags: &[Compound],
        sets: 4,
        reps: Reps::Range(6, 10),
        rest_seconds: 120,
        weight: Some("70-80% of one-rep max"),
        calories_per_minute: 7.0,
        contraindications: &["shoulder_injury"],
    },
    ExerciseData {
        id: "barbell-back-squat",
        name: "Barbell Back Squat",
        groups: &[Legs, Glutes, Core],
        equipment: &[Barbell],
        category: Strength,
        difficulty: Intermediate,
        tags: &[Compound],
        sets: 4,
        reps: Reps::Range(6, 10),
        rest_seconds: 120,
        weight: Some("70-80% of one-rep max"),
        calories_per_minute: 9.0,
        contraindications: &["knee_injury", "lower_back"],
    },
    ExerciseData {
        id: "romanian-deadlift",
        name: "Romanian Deadlift",
        groups: &[Legs, Glutes, Back],
        equipment: &[Barbell],
        category: Strength,
        difficulty: Advanced,
        tags: &[Compound],
        sets: 4,
        reps: Reps::Range(8, 10),
        rest_seconds: 120,
        weight: Some("moderate to heavy"),
        calories_per_minute: 8.5,
        contraindications: &["lower_back"],
    },
    ExerciseData {
        id: "dumbbell-row",
        name: "Dumbbell Row",
        groups: &[Back, Arms],
        equipment: &[Dumbbell, Bench],
        category: Strength,
        difficulty: Beginner,
        tags: &[Compound],
        sets: 3,
        reps: Reps::Range(8, 12),
        rest_seconds: 60,
        weight: Some("moderate"),
        calories_per_minute: 6.0,
        contraindications: &[],
    },
    ExerciseData {
        id: "goblet-squat",
        name: "Goblet Squat",
        groups: &[Legs, Glutes, Core],
        equipment: &[Dumbbell],
        category: Strength,
        difficulty: Beginner,
        tags: &[Compound],
        sets: 3,
        reps: Reps::Range(10, 12),
        rest_seconds: 60,
        weight: Some("moderate"),
        calories_per_minute: 8.0,
        contraindications: &["knee_injury"],
    },
    ExerciseData {
        id: "dumbbell-shoulder-press",
        name: "Dumbbell Shoulder Press",
        groups: &[Shoulders, Arms],
        equipment: &[Dumbbell],
        category: Strength,
        difficulty: Beginner,
        tags: &[Compound],
        sets: 3,
        reps: Reps::Range(8, 12),
        rest_seconds: 60,
        weight: Some("moderate"),
        calories_per_minute: 6.0,
        contraindications: &["shoulder_injury"],
    },
    ExerciseData {
        id: "walking-lunge",
        name: "Walking Lunge",
        groups: &[Legs, Glutes],
        equipment: &[],
        category: Strength,
        difficulty: Beginner,
        tags: &[Compound],
        sets: 3,
        reps: Reps::Range(10, 12),
        rest_seconds: 60,
        weight: Some("bodyweight"),
        calories_per_minute: 7.0,
        contraindications: &["knee_injury"],
    },
    ExerciseData {
        id: "bodyweight-squat",
        name: "Bodyweight Squat",
        groups: &[Legs, Glutes],
        equipment: &[],
        category: Strength,
        difficulty: Beginner,
        tags: &[Compound],
        sets: 3,
        reps: Reps::Range(15, 20),
        rest_seconds: 45,
        weight: Some("bodyweight"),
        calories_per_minute: 6.5,
        contraindications: &["knee_injury"],
    },
    ExerciseData {
        id: "kettlebell-swing",
        name: "Kettlebell Swing",
        groups: &[Glutes, Legs, Back, FullBody],
        equipment: &[Kettlebell],
        category: Strength,
        difficulty: Intermediate,
        tags: &[Compound, Plyometric],
        sets: 3,
        reps: Reps::Range(15, 20),
        rest_seconds: 60,
        weight: Some("moderate"),
        calories_per_minute: 11.0,
        contraindications: &["lower_back"],
    },
    ExerciseData {
        id: "lat-pulldown",
        name: "Lat Pulldown",
        groups: &[Back, Arms],
        equipment: &[Cable],
        category: Strength,
        difficulty: Beginner,
        tags: &[Compound],
        sets: 3,
        reps: Reps::Range(10, 12),
        rest_seconds: 60,
        weight: Some("moderate"),
        calories_per_minute: 5.5,
        contraindications: &[],
    },
    // Isolation strength
    ExerciseData {
        id: "glute-bridge",
        name: "Glute Bridge",
        groups: &[Glutes, Legs, Core],
        equipment: &[],
        category: Strength,
        difficulty: Beginner,
        tags: &[Isolation],
        sets: 3,
        reps: Reps::Range(12, 15),
        rest_seconds: 45,
        weight: Some("bodyweight"),
        calories_per_minute: 5.0,
        contraindications: &[],
    },
    ExerciseData {
        id: "dumbbell-bicep-curl",
        name: "Dumbbell Bicep Curl",
        groups: &[Arms],
        equipment: &[Dumbbell],
        category: Strength,
        difficulty: Beginner,
        tags: &[Isolation],
        sets: 3,
        reps: Reps::Range(10, 12),
        rest_seconds: 45,
        weight: Some("light to moderate"),
        calories_per_minute: 5.0,
        contraindications: &[],
    },
    ExerciseData {
        id: "bench-tricep-dip",
        name: "Bench Tricep Dip",
        groups: &[Arms, Chest],
        equipment: &[Bench],
        category: Strength,
        difficulty: Beginner,
        tags: &[Isolation],
        sets: 3,
        reps: Reps::Range(10, 15),
        rest_seconds: 45,
        weight: Some("bodyweight"),
        calories_per_minute: 5.5,
        contraindications: &["shoulder_injury"],
    },
    ExerciseData {
        id: "lateral-raise",
        name: "Dumbbell Lateral Raise",
        groups: &[Shoulders],
        equipment: &[Dumbbell],
        category: Strength,
        difficulty: Beginner,
        tags: &[Isolation],
        sets: 3,
        reps: Reps::Range(12, 15),
        rest_seconds: 45,
        weight: Some("light"),
        calories_per_minute: 5.0,
        contraindications: &["shoulder_injury"],
    },
    ExerciseData {
        id: "band-pull-apart",
        name: "Band Pull-Apart",
        groups: &[Back, Shoulders],
        equipment: &[ResistanceBand],
        category: Strength,
        difficulty: Beginner,
        tags: &[Isolation],
        sets: 3,
        reps: Reps::Range(15, 20),
        rest_seconds: 30,
        weight: Some("light band"),
        calories_per_minute: 5.0,
        contraindications: &[],
    },
    ExerciseData {
        id: "plank",
        name: "Plank",
        groups: &[Core],
        equipment: &[],
        category: Strength,
        difficulty: Beginner,
        tags: &[Isolation],
        sets: 3,
        reps: Reps::Timed("45 seconds"),
        rest_seconds: 30,
        weight: None,
        calories_per_minute: 5.0,
        contraindications: &[],
    },
    ExerciseData {
        id: "russian-twist",
        name: "Russian Twist",
        groups: &[Core],
        equipment: &[],
        category: Strength,
        difficulty: Intermediate,
        tags: &[Isolation],
        sets: 3,
        reps: Reps::Range(16, 20),
        rest_seconds: 30,
        weight: None,
        calories_per_minute: 6.0,
        contraindications: &["lower_back"],
    },
    ExerciseData {
        id: "lying-leg-curl",
        name: "Lying Leg Curl",
        groups: &[Legs],
        equipment: &[Machine],
        category: Strength,
        difficulty: Beginner,
        tags: &[Isolation],
        sets: 3,
        reps: Reps::Range(10, 12),
        rest_seconds: 60,
        weight: Some("moderate"),
        calories_per_minute: 5.0,
        contraindications: &[],
    },
    ExerciseData {
        id: "cable-chest-fly",
        name: "Cable Chest Fly",
        groups: &[Chest],
        equipment: &[Cable],
        category: Strength,
        difficulty: Intermediate,
        tags: &[Isolation],
        sets: 3,
        reps: Reps::Range(12, 15),
        rest_seconds: 60,
        weight: Some("light to moderate"),
        calories_per_minute: 5.0,
        contraindications: &["shoulder_injury"],
    },
    // Conditioning
    ExerciseData {
        id: "jumping-jacks",
        name: "Jumping Jacks",
        groups: &[FullBody, MuscleGroup::Cardio],
        equipment: &[],
        category: Cardio,
        difficulty: Beginner,
        tags: &[Plyometric],
        sets: 2,
        reps: Reps::Timed("45 seconds"),
        rest_seconds: 15,
        weight: None,
        calories_per_minute: 8.0,
        contraindications: &[],
    },
    ExerciseData {
        id: "burpee",
        name: "Burpee",
        groups: &[FullBody, MuscleGroup::Cardio, Chest, Legs],
        equipment: &[],
        category: Cardio,
        difficulty: Intermediate,
        tags: &[Compound, Plyometric],
        sets: 4,
        reps: Reps::Timed("40 seconds"),
        rest_seconds: 20,
        weight: None,
        calories_per_minute: 12.0,
        contraindications: &["knee_injury", "wrist"],
    },
    ExerciseData {
        id: "mountain-climbers",
        name: "Mountain Climbers",
        groups: &[Core, MuscleGroup::Cardio, Shoulders],
        equipment: &[],
        category: Cardio,
        difficulty: Beginner,
        tags: &[Compound],
        sets: 4,
        reps: Reps::Timed("40 seconds"),
        rest_seconds: 20,
        weight: None,
        calories_per_minute: 10.0,
        contraindications: &["wrist"],
    },
    ExerciseData {
        id: "jump-squat",
        name: "Jump Squat",
        groups: &[Legs, Glutes, MuscleGroup::Cardio],
        equipment: &[],
        category: Cardio,
        difficulty: Intermediate,
        tags: &[Compound, Plyometric],
        sets: 4,
        reps: Reps::Range(12, 15),
        rest_seconds: 30,
        weight: None,
        calories_per_minute: 11.0,
        contraindications: &["knee_injury"],
    },
    ExerciseData {
        id: "high-knees",
        name: "High Knees",
        groups: &[Legs, MuscleGroup::Cardio, Core],
        equipment: &[],
        category: Cardio,
        difficulty: Beginner,
        tags: &[Plyometric],
        sets: 4,
        reps: Reps::Timed("30 seconds"),
        rest_seconds: 20,
        weight: None,
        calories_per_minute: 9.0,
        contraindications: &[],
    },
    ExerciseData {
        id: "jump-rope-intervals",
        name: "Jump Rope Intervals",
        groups: &[MuscleGroup::Cardio, Legs],
        equipment: &[JumpRope],
        category: Cardio,
        difficulty: Beginner,
        tags: &[Plyometric],
        sets: 5,
        reps: Reps::Timed("60 seconds"),
        rest_seconds: 30,
        weight: None,
        calories_per_minute: 12.0,
        contraindications: &[],
    },
    ExerciseData {
        id: "rowing-intervals",
        name: "Rowing Machine Intervals",
        groups: &[MuscleGroup::Cardio, Back, Legs, FullBody],
        equipment: &[Machine],
        category: Cardio,
        difficulty: Intermediate,
        tags: &[Compound],
        sets: 5,
        reps: Reps::Timed("250 meters"),
        rest_seconds: 60,
        weight: None,
        calories_per_minute: 10.0,
        contraindications: &["lower_back"],
    },
];

impl ExerciseData {
    fn to_exercise(&self) -> Exercise {
        Exercise {
            id: self.id.to_owned(),
            name: self.name.to_owned(),
            muscle_groups: self.groups.iter().copied().collect(),
            equipment: self.equipment.iter().copied().collect(),
            category: self.category,
            difficulty: self.difficulty,
            tags: self.tags.iter().copied().collect(),
            sets: self.sets,
            reps: match self.reps {
                Reps::Range(min, max) => RepScheme::Range { min, max },
                Reps::Timed(value) => RepScheme::Duration {
                    value: value.to_owned(),
                },
            },
            rest_seconds: self.rest_seconds,
            weight_guidance: self.weight.map(str::to_owned),
            calories_per_minute: self.calories_per_minute,
            contraindications: self
                .contraindications
                .iter()
                .map(|c| (*c).to_owned())
                .collect(),
        }
    }
}

/// Exercises shipped with the planner, in a stable order
#[must_use]
pub fn default_exercise_library() -> Vec<Exercise> {
    EXERCISE_LIBRARY
        .iter()
        .map(ExerciseData::to_exercise)
        .collect()
}
