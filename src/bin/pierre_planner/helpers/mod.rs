// ABOUTME: Helper modules for pierre-planner
// ABOUTME: Provides terminal display formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod display;
