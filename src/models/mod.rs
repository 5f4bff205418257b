// ABOUTME: Domain models for user profiles, generated plans and request payloads
// ABOUTME: Serde types mirroring the camelCase JSON exchanged with clients and models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Data models
//!
//! Every type here is plain data. Structural checks that produce per-field
//! error reports live in [`crate::schema`]; these types are only built from
//! values that already passed those checks.

mod plan;
mod profile;

pub use plan::{
    DayPlan, DietPlan, Exercise, GeneratePlanRequest, GeneratedPlan, PromptOptions, Reps,
    WorkoutPlan,
};
pub use profile::{ActivityLevel, Gender, UserProfile};
