// ABOUTME: Environment configuration for the workout planner runtime
// ABOUTME: Parses storage, confirmation and generation defaults from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use crate::errors::{AppError, AppResult};
use pierre_core::constants::conversation::{
    DEFAULT_CONFIRMATION_TTL_SECS, DEFAULT_MAX_PENDING_PROPOSALS,
    DEFAULT_SUBSTITUTION_ALTERNATIVES, DEFAULT_WORKOUT_MINUTES,
};
use pierre_core::models::DifficultyLevel;
use pierre_intelligence::EquipmentProfile;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Default directory for the file-backed store
pub const DEFAULT_DATA_DIR: &str = "./data/planner";

/// Environment variable names
pub mod env_keys {
    /// Directory for the file-backed store
    pub const DATA_DIR: &str = "PIERRE_PLANNER_DATA_DIR";
    /// Storage backend (`file` or `memory`)
    pub const STORAGE: &str = "PIERRE_PLANNER_STORAGE";
    /// Confirmation ttl in seconds, 0 disables expiry
    pub const CONFIRMATION_TTL_SECS: &str = "PIERRE_CONFIRMATION_TTL_SECS";
    /// Pending proposals allowed per session
    pub const MAX_PENDING_PROPOSALS: &str = "PIERRE_MAX_PENDING_PROPOSALS";
    /// Alternatives offered for a substitution
    pub const SUBSTITUTION_ALTERNATIVES: &str = "PIERRE_SUBSTITUTION_ALTERNATIVES";
    /// Duration used when a creation request names none
    pub const DEFAULT_WORKOUT_MINUTES: &str = "PIERRE_DEFAULT_WORKOUT_MINUTES";
    /// Equipment profile used when a creation request names none
    pub const DEFAULT_EQUIPMENT: &str = "PIERRE_DEFAULT_EQUIPMENT";
    /// Experience level used when a creation request names none
    pub const DEFAULT_EXPERIENCE: &str = "PIERRE_DEFAULT_EXPERIENCE";
}

/// Persistence backend selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per key under the data directory
    #[default]
    File,
    /// Process memory only
    Memory,
}

impl StorageBackend {
    /// Parse from string
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` for unrecognized values
    pub fn parse(s: &str) -> AppResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "file" | "disk" => Ok(Self::File),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(AppError::config(format!(
                "Invalid {} value '{other}', expected 'file' or 'memory'",
                env_keys::STORAGE
            ))),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Confirmation broker settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationConfig {
    /// Proposal lifetime; `None` disables expiry
    pub ttl: Option<Duration>,
    /// Pending proposals allowed per session before the oldest is evicted
    pub max_pending_per_session: usize,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            ttl: Some(Duration::from_secs(DEFAULT_CONFIRMATION_TTL_SECS)),
            max_pending_per_session: DEFAULT_MAX_PENDING_PROPOSALS,
        }
    }
}

/// Defaults applied to conversational workout requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationDefaults {
    /// Duration when the message names none
    pub workout_minutes: u32,
    /// Equipment when the message names none
    pub equipment: EquipmentProfile,
    /// Experience level when the message names none
    pub experience: DifficultyLevel,
    /// Alternatives offered for a substitution
    pub substitution_alternatives: usize,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            workout_minutes: DEFAULT_WORKOUT_MINUTES,
            equipment: EquipmentProfile::Home,
            experience: DifficultyLevel::Intermediate,
            substitution_alternatives: DEFAULT_SUBSTITUTION_ALTERNATIVES,
        }
    }
}

/// Complete planner configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Storage backend
    pub storage: StorageBackend,
    /// Directory for the file-backed store
    pub data_dir: PathBuf,
    /// Confirmation broker settings
    pub confirmation: ConfirmationConfig,
    /// Conversational generation defaults
    pub generation: GenerationDefaults,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::default(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            confirmation: ConfirmationConfig::default(),
            generation: GenerationDefaults::default(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` when a variable is set to an unparseable value
    pub fn from_env() -> AppResult<Self> {
        info!("Loading planner configuration from environment variables");

        let storage = StorageBackend::parse(&env_var_or(env_keys::STORAGE, "file"))?;
        let data_dir = PathBuf::from(env_var_or(env_keys::DATA_DIR, DEFAULT_DATA_DIR));

        let ttl_secs: u64 =
            parse_env(env_keys::CONFIRMATION_TTL_SECS, DEFAULT_CONFIRMATION_TTL_SECS)?;
        let max_pending: usize =
            parse_env(env_keys::MAX_PENDING_PROPOSALS, DEFAULT_MAX_PENDING_PROPOSALS)?;
        let alternatives: usize = parse_env(
            env_keys::SUBSTITUTION_ALTERNATIVES,
            DEFAULT_SUBSTITUTION_ALTERNATIVES,
        )?;
        let workout_minutes: u32 =
            parse_env(env_keys::DEFAULT_WORKOUT_MINUTES, DEFAULT_WORKOUT_MINUTES)?;

        let equipment_raw = env_var_or(env_keys::DEFAULT_EQUIPMENT, "home");
        let equipment = EquipmentProfile::parse(&equipment_raw).ok_or_else(|| {
            AppError::config(format!(
                "Invalid {} value '{equipment_raw}'",
                env_keys::DEFAULT_EQUIPMENT
            ))
        })?;

        let experience_raw = env_var_or(env_keys::DEFAULT_EXPERIENCE, "intermediate");
        let experience = DifficultyLevel::parse(&experience_raw).ok_or_else(|| {
            AppError::config(format!(
                "Invalid {} value '{experience_raw}'",
                env_keys::DEFAULT_EXPERIENCE
            ))
        })?;

        let config = Self {
            storage,
            data_dir,
            confirmation: ConfirmationConfig {
                ttl: (ttl_secs > 0).then(|| Duration::from_secs(ttl_secs)),
                max_pending_per_session: max_pending,
            },
            generation: GenerationDefaults {
                workout_minutes,
                equipment,
                experience,
                substitution_alternatives: alternatives,
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` for zero caps or durations
    pub fn validate(&self) -> AppResult<()> {
        if self.confirmation.max_pending_per_session == 0 {
            return Err(AppError::config(format!(
                "{} must be at least 1",
                env_keys::MAX_PENDING_PROPOSALS
            )));
        }
        if self.generation.substitution_alternatives == 0 {
            return Err(AppError::config(format!(
                "{} must be at least 1",
                env_keys::SUBSTITUTION_ALTERNATIVES
            )));
        }
        if self.generation.workout_minutes == 0 {
            return Err(AppError::config(format!(
                "{} must be at least 1",
                env_keys::DEFAULT_WORKOUT_MINUTES
            )));
        }
        Ok(())
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        let ttl = self
            .confirmation
            .ttl
            .map_or_else(|| "disabled".to_owned(), |ttl| format!("{}s", ttl.as_secs()));
        format!(
            "Pierre Workout Planner Configuration:\n\
             - Storage: {} ({})\n\
             - Confirmation TTL: {ttl}\n\
             - Max Pending Proposals: {}\n\
             - Default Workout: {} min, {} equipment, {} level",
            self.storage,
            self.data_dir.display(),
            self.confirmation.max_pending_per_session,
            self.generation.workout_minutes,
            self.generation.equipment,
            self.generation.experience,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_env<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {key} value '{raw}': {e}"))),
        Err(_) => Ok(default),
    }
}
