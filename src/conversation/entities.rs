// ABOUTME: Heuristic entity extraction for classified messages
// ABOUTME: Resolves dates, durations, exercise references, focus, equipment and level keywords
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{Datelike, Days, NaiveDate, Weekday};
use pierre_core::models::{DifficultyLevel, Exercise};
use pierre_intelligence::EquipmentProfile;
use regex::Regex;
use std::sync::LazyLock;

const DATE_TOKEN: &str = r"(?:(next)\s+)?(today|tonight|tomorrow|yesterday|monday|tuesday|wednesday|thursday|friday|saturday|sunday|\d{4}-\d{2}-\d{2})\b";

static DATE_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: today, tomorrow, yesterday, (next) friday, 2025-03-07
    Regex::new(&format!(r"(?i)\b{DATE_TOKEN}")).ok()
});

static DESTINATION_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: to friday, until tomorrow, onto next monday
    Regex::new(&format!(
        r"(?i)\b(?:to|until|till|onto|into)\s+{DATE_TOKEN}"
    ))
    .ok()
});

static DURATION_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 30 min, 45mins, 20-minute, 60 minutes
    Regex::new(r"(?i)\b(\d{1,3})\s*-?\s*(?:min|mins|minute|minutes)\b").ok()
});

static EXERCISE_PHRASE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // replace the squats with something else
        r"(?i)\b(?:replace|swap|substitute|switch)\s+(?:out\s+)?(?:the\s+|my\s+|those\s+)?(.+?)(?:\s+(?:with|for|on|today|tomorrow|because|in|from)\b|[.?!,]|$)",
        // something instead of burpees
        r"(?i)\binstead\s+of\s+(?:the\s+|my\s+)?(.+?)(?:\s+(?:today|tomorrow|on|because)\b|[.?!,]|$)",
        // I can't do pull-ups
        r"(?i)\bcan['’]?t\s+do\s+(?:the\s+|my\s+|any\s+)?(.+?)(?:\s+(?:today|tomorrow|on|because)\b|[.?!,]|$)",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

static REASON_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:because|since|as)\s+(?:of\s+)?(?:my\s+)?(.+?)[.?!]*$").ok()
});

/// Focus phrases, longest first so "upper body" wins over "body"
const FOCUS_KEYWORDS: &[&str] = &[
    "upper body",
    "lower body",
    "full body",
    "total body",
    "conditioning",
    "shoulders",
    "mobility",
    "strength",
    "stretch",
    "cardio",
    "glutes",
    "chest",
    "arms",
    "back",
    "core",
    "hiit",
    "legs",
    "yoga",
    "abs",
    "leg",
    "push",
    "pull",
];

const EQUIPMENT_KEYWORDS: &[(&str, EquipmentProfile)] = &[
    ("no equipment", EquipmentProfile::Bodyweight),
    ("bodyweight", EquipmentProfile::Bodyweight),
    ("body weight", EquipmentProfile::Bodyweight),
    ("minimal", EquipmentProfile::Minimal),
    ("hotel", EquipmentProfile::Minimal),
    ("travel", EquipmentProfile::Minimal),
    ("gym", EquipmentProfile::Gym),
    ("home", EquipmentProfile::Home),
    ("dumbbell", EquipmentProfile::Home),
];

const LEVEL_KEYWORDS: &[(&str, DifficultyLevel)] = &[
    ("beginner", DifficultyLevel::Beginner),
    ("easy", DifficultyLevel::Beginner),
    ("gentle", DifficultyLevel::Beginner),
    ("intermediate", DifficultyLevel::Intermediate),
    ("moderate", DifficultyLevel::Intermediate),
    ("advanced", DifficultyLevel::Advanced),
    ("intense", DifficultyLevel::Advanced),
    ("hard", DifficultyLevel::Advanced),
];

fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Next occurrence of `weekday` on or after `today`
#[must_use]
pub fn next_weekday(today: NaiveDate, weekday: Weekday) -> NaiveDate {
    let ahead = (7 + weekday.num_days_from_monday() - today.weekday().num_days_from_monday()) % 7;
    today
        .checked_add_days(Days::new(u64::from(ahead)))
        .unwrap_or(today)
}

fn resolve_date(token: &str, next: bool, today: NaiveDate) -> Option<NaiveDate> {
    let token = token.to_lowercase();
    match token.as_str() {
        "today" | "tonight" => Some(today),
        "tomorrow" => today.checked_add_days(Days::new(1)),
        "yesterday" => today.checked_sub_days(Days::new(1)),
        name => {
            if let Some(weekday) = weekday_from_name(name) {
                let date = next_weekday(today, weekday);
                if next && date == today {
                    return today.checked_add_days(Days::new(7));
                }
                return Some(date);
            }
            NaiveDate::parse_from_str(name, "%Y-%m-%d").ok()
        }
    }
}

/// Dates mentioned in `message`, in order of appearance
#[must_use]
pub fn extract_dates(message: &str, today: NaiveDate) -> Vec<NaiveDate> {
    let Some(pattern) = DATE_PATTERN.as_ref() else {
        return Vec::new();
    };
    pattern
        .captures_iter(message)
        .filter_map(|caps| {
            let next = caps.get(1).is_some();
            caps.get(2)
                .and_then(|token| resolve_date(token.as_str(), next, today))
        })
        .collect()
}

/// The date introduced as a destination ("to friday", "until tomorrow")
#[must_use]
pub fn extract_destination_date(message: &str, today: NaiveDate) -> Option<NaiveDate> {
    let caps = DESTINATION_PATTERN.as_ref()?.captures(message)?;
    let next = caps.get(1).is_some();
    resolve_date(caps.get(2)?.as_str(), next, today)
}

/// Requested duration in minutes, if the message names one
#[must_use]
pub fn extract_duration(message: &str) -> Option<u32> {
    DURATION_PATTERN
        .as_ref()?
        .captures(message)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
        .filter(|minutes| *minutes > 0)
}

/// The phrase naming the exercise to substitute
#[must_use]
pub fn extract_exercise_phrase(message: &str) -> Option<String> {
    EXERCISE_PHRASE_PATTERNS.iter().find_map(|pattern| {
        let phrase = pattern.captures(message)?.get(1)?.as_str().trim();
        let phrase = phrase
            .trim_start_matches("today's ")
            .trim_start_matches("tomorrow's ")
            .trim();
        (!phrase.is_empty() && !phrase.eq_ignore_ascii_case("it")).then(|| phrase.to_owned())
    })
}

/// Why the athlete wants a substitution
#[must_use]
pub fn extract_reason(message: &str) -> Option<String> {
    let reason = REASON_PATTERN
        .as_ref()?
        .captures(message)?
        .get(1)?
        .as_str()
        .trim();
    (!reason.is_empty()).then(|| reason.to_owned())
}

/// First focus keyword in the message
#[must_use]
pub fn extract_focus(message: &str) -> Option<String> {
    let lower = message.to_lowercase();
    FOCUS_KEYWORDS
        .iter()
        .find(|keyword| contains_word(&lower, keyword))
        .map(|keyword| (*keyword).to_owned())
}

/// Equipment profile named in the message
#[must_use]
pub fn extract_equipment(message: &str) -> Option<EquipmentProfile> {
    let lower = message.to_lowercase();
    EQUIPMENT_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, profile)| *profile)
}

/// Experience level named in the message
#[must_use]
pub fn extract_level(message: &str) -> Option<DifficultyLevel> {
    let lower = message.to_lowercase();
    LEVEL_KEYWORDS
        .iter()
        .find(|(keyword, _)| contains_word(&lower, keyword))
        .map(|(_, level)| *level)
}

fn contains_word(haystack: &str, word: &str) -> bool {
    haystack.match_indices(word).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + word.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Lowercased exercise names mapped to catalog ids
#[derive(Debug, Clone, Default)]
pub struct ExerciseIndex {
    entries: Vec<(String, String)>,
}

impl ExerciseIndex {
    /// Index every exercise by its full name and its final word
    ///
    /// The final word ("squat", "press") lets "swap the squats" resolve to
    /// the first matching catalog entry.
    #[must_use]
    pub fn new(exercises: &[Exercise]) -> Self {
        let mut entries: Vec<(String, String)> = Vec::new();
        for exercise in exercises {
            let name = exercise.name.to_lowercase();
            if let Some(last) = name.split_whitespace().last() {
                if last.len() >= 4 && last != name && !entries.iter().any(|(n, _)| n == last) {
                    entries.push((last.to_owned(), exercise.id.clone()));
                }
            }
            entries.push((name, exercise.id.clone()));
        }
        Self { entries }
    }

    /// Id of the exercise whose indexed name is the longest match in `message`
    #[must_use]
    pub fn find(&self, message: &str) -> Option<&str> {
        let lower = message.to_lowercase();
        let mut best: Option<&(String, String)> = None;
        for entry in &self.entries {
            if lower.contains(entry.0.as_str())
                && best.map_or(true, |(name, _)| entry.0.len() > name.len())
            {
                best = Some(entry);
            }
        }
        best.map(|(_, id)| id.as_str())
    }

    /// Number of indexed names
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is indexed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2025-03-06 is a Thursday
    fn thursday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 6).unwrap()
    }

    #[test]
    fn test_relative_dates() {
        let today = thursday();
        let dates = extract_dates("move tomorrow's workout to monday", today);
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2025, 3, 7).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            ]
        );
        assert_eq!(extract_dates("what about thursday", today), vec![today]);
        assert_eq!(
            extract_dates("next thursday", today),
            vec![NaiveDate::from_ymd_opt(2025, 3, 13).unwrap()]
        );
        assert_eq!(
            extract_dates("on 2025-04-01 please", today),
            vec![NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()]
        );
    }

    #[test]
    fn test_duration_and_keywords() {
        let message = "Create a 45 minute upper body workout at the gym, advanced please";
        assert_eq!(extract_duration(message), Some(45));
        assert_eq!(extract_focus(message).as_deref(), Some("upper body"));
        assert_eq!(extract_equipment(message), Some(EquipmentProfile::Gym));
        assert_eq!(extract_level(message), Some(DifficultyLevel::Advanced));
        assert_eq!(extract_duration("make me a workout"), None);
    }

    #[test]
    fn test_exercise_phrase_and_reason() {
        assert_eq!(
            extract_exercise_phrase("Replace the burpees with something easier").as_deref(),
            Some("burpees")
        );
        assert_eq!(
            extract_exercise_phrase("I can't do pull-ups today").as_deref(),
            Some("pull-ups")
        );
        assert_eq!(
            extract_reason("swap lunges because my knee hurts").as_deref(),
            Some("knee hurts")
        );
    }

    #[test]
    fn test_exercise_phrase_with_typographic_apostrophe() {
        assert_eq!(
            extract_exercise_phrase("I can\u{2019}t do burpees").as_deref(),
            Some("burpees")
        );
    }

    #[test]
    fn test_destination_date_needs_a_preposition() {
        let today = thursday();
        assert_eq!(
            extract_destination_date("push it to monday", today),
            NaiveDate::from_ymd_opt(2025, 3, 10)
        );
        assert_eq!(
            extract_destination_date("move tomorrow's workout to monday", today),
            NaiveDate::from_ymd_opt(2025, 3, 10)
        );
        assert_eq!(extract_destination_date("postpone tomorrow's workout", today), None);
    }
}
