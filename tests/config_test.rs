// ABOUTME: Integration tests for environment-driven planner configuration
// ABOUTME: Validates defaults, overrides, ttl handling and rejection of malformed values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use pierre_workout_planner::{
    config::{env_keys, PlannerConfig, StorageBackend},
    errors::ErrorCode,
    intelligence::EquipmentProfile,
    models::DifficultyLevel,
};
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const ALL_KEYS: &[&str] = &[
    env_keys::DATA_DIR,
    env_keys::STORAGE,
    env_keys::CONFIRMATION_TTL_SECS,
    env_keys::MAX_PENDING_PROPOSALS,
    env_keys::SUBSTITUTION_ALTERNATIVES,
    env_keys::DEFAULT_WORKOUT_MINUTES,
    env_keys::DEFAULT_EQUIPMENT,
    env_keys::DEFAULT_EXPERIENCE,
];

fn clear_env() {
    for key in ALL_KEYS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_defaults_when_unset() {
    clear_env();
    let config = PlannerConfig::from_env().unwrap();
    assert_eq!(config, PlannerConfig::default());
    assert_eq!(config.storage, StorageBackend::File);
    assert_eq!(config.confirmation.ttl, Some(Duration::from_secs(300)));
}

#[test]
#[serial]
fn test_overrides_are_applied() {
    clear_env();
    env::set_var(env_keys::STORAGE, "memory");
    env::set_var(env_keys::DATA_DIR, "/tmp/planner-test");
    env::set_var(env_keys::CONFIRMATION_TTL_SECS, "60");
    env::set_var(env_keys::MAX_PENDING_PROPOSALS, "3");
    env::set_var(env_keys::SUBSTITUTION_ALTERNATIVES, "5");
    env::set_var(env_keys::DEFAULT_WORKOUT_MINUTES, "25");
    env::set_var(env_keys::DEFAULT_EQUIPMENT, "bodyweight");
    env::set_var(env_keys::DEFAULT_EXPERIENCE, "advanced");

    let config = PlannerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.storage, StorageBackend::Memory);
    assert_eq!(config.data_dir, PathBuf::from("/tmp/planner-test"));
    assert_eq!(config.confirmation.ttl, Some(Duration::from_secs(60)));
    assert_eq!(config.confirmation.max_pending_per_session, 3);
    assert_eq!(config.generation.substitution_alternatives, 5);
    assert_eq!(config.generation.workout_minutes, 25);
    assert_eq!(config.generation.equipment, EquipmentProfile::Bodyweight);
    assert_eq!(config.generation.experience, DifficultyLevel::Advanced);
    assert!(config.summary().contains("memory"));
}

#[test]
#[serial]
fn test_zero_ttl_disables_expiry() {
    clear_env();
    env::set_var(env_keys::CONFIRMATION_TTL_SECS, "0");
    let config = PlannerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.confirmation.ttl, None);
    assert!(config.summary().contains("disabled"));
}

#[test]
#[serial]
fn test_malformed_values_are_config_errors() {
    for (key, value) in [
        (env_keys::STORAGE, "redis"),
        (env_keys::CONFIRMATION_TTL_SECS, "soon"),
        (env_keys::DEFAULT_EQUIPMENT, "spaceship"),
        (env_keys::DEFAULT_EXPERIENCE, "legendary"),
        (env_keys::MAX_PENDING_PROPOSALS, "0"),
    ] {
        clear_env();
        env::set_var(key, value);
        let err = PlannerConfig::from_env().unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalid, "{key}={value}");
    }
    clear_env();
}
