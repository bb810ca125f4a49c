// ABOUTME: Re-exports the unified error types from pierre-core for the planner crate
// ABOUTME: Keeps crate::errors paths stable for storage, schedule and conversation modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Error codes, `AppError` and `ErrorResponse` live in `pierre-core` so the
//! intelligence crate and the planner share one taxonomy.

pub use pierre_core::errors::{
    AppError, AppResult, ErrorCode, ErrorContext, ErrorResponse,
};
