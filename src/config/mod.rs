// ABOUTME: Configuration management module for the workout planner runtime
// ABOUTME: Exposes environment-driven storage, confirmation and generation settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the Pierre workout planner
//!
//! - **Environment**: planner configuration from environment variables
//! - **Logging**: see [`crate::logging::LoggingConfig`]

/// Environment and runtime configuration
pub mod environment;

pub use environment::{
    env_keys, ConfirmationConfig, GenerationDefaults, PlannerConfig, StorageBackend,
};
