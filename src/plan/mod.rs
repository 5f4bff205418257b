// ABOUTME: Plan recovery pipeline turning free-form model output into a usable plan
// ABOUTME: JSON extraction, strict and heuristic classification, and one repair round-trip
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Recovery
//!
//! Language models often wrap JSON in prose or code fences, drop required
//! keys or nest them wrongly. [`PlanGenerator`] recovers what it can:
//!
//! 1. validate the user profile (no model call on failure)
//! 2. prompt the model and [`extract_json`] from its text
//! 3. accept a strictly valid plan as is
//! 4. accept a plan whose `workoutPlan.dayWise` is an array, with a warning
//! 5. otherwise re-prompt once with the validation errors
//!
//! Every path ends in a [`PlanOutcome`] that keeps the raw model text.

mod extract;
mod orchestrator;
mod outcome;

pub use extract::{extract_json, is_truthy};
pub use orchestrator::PlanGenerator;
pub use outcome::PlanOutcome;
