// ABOUTME: Re-exports command modules for pierre-planner
// ABOUTME: Provides schedule, generation and chat commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod chat;
pub mod generate;
pub mod schedule;
