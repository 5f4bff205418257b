// ABOUTME: Declarative structural validation for user profiles and generated plans
// ABOUTME: Produces per-field error reports and typed values from untrusted JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Schema Validation
//!
//! Model output and client payloads are untrusted JSON. Each accepted shape is
//! described once as a [`Shape`] tree; [`check`] walks a value against it and
//! collects every violation into [`FieldErrors`] instead of stopping at the
//! first one. Only values with an empty report are deserialized into the
//! typed models.
//!
//! ```rust
//! use fitplan_server::schema::validate_profile;
//! use serde_json::json;
//!
//! let errors = validate_profile(&json!({ "age": 30 })).unwrap_err();
//! assert_eq!(errors.get("name"), Some(&["Required".to_owned()][..]));
//! ```

mod definitions;
mod shape;

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{GeneratedPlan, UserProfile};

pub use definitions::{generated_plan_shape, user_profile_shape};
pub use shape::{check, normalize, Field, Shape, INTEGER_MAX};

/// Key under which errors about the value as a whole are reported
pub const ROOT_PATH: &str = "_root";

/// Validation report: field path to the messages raised at that path
///
/// Paths use dotted keys with bracketed indices, for example
/// `workoutPlan.dayWise[0].day`. Serializes as a JSON object so it can be
/// embedded in responses and repair prompts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Empty report
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message at a path
    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.entry(path.into()).or_default().push(message.into());
    }

    /// Report holding a single error about the whole value
    #[must_use]
    pub fn root(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(ROOT_PATH, message);
        errors
    }

    /// Whether no violation was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of paths with at least one message
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Messages recorded at a path
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.0.get(path).map(Vec::as_slice)
    }

    /// Iterate paths and their messages in path order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// JSON object form used in responses
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(&self.0).unwrap_or(Value::Null)
    }
}

/// Check `value` against `shape` and deserialize it on success
///
/// # Errors
///
/// Returns the full violation report when the value does not match the
/// shape, or a root-level error if the typed conversion still rejects it.
pub fn validate<T: DeserializeOwned>(value: &Value, shape: &Shape) -> Result<T, FieldErrors> {
    let errors = check(value, shape);
    if !errors.is_empty() {
        return Err(errors);
    }
    serde_json::from_value(normalize(value, shape)).map_err(|e| FieldErrors::root(e.to_string()))
}

/// Validate an untrusted user profile
///
/// # Errors
///
/// Returns the violation report when the profile is structurally invalid.
pub fn validate_profile(value: &Value) -> Result<UserProfile, FieldErrors> {
    validate(value, user_profile_shape())
}

/// Validate an untrusted plan
///
/// # Errors
///
/// Returns the violation report when the plan is structurally invalid.
pub fn validate_plan(value: &Value) -> Result<GeneratedPlan, FieldErrors> {
    validate(value, generated_plan_shape())
}

/// Loose usability check: an object whose `workoutPlan.dayWise` is an array
///
/// Entries of `dayWise` are not inspected.
#[must_use]
pub fn looks_like_plan(value: &Value) -> bool {
    value
        .get("workoutPlan")
        .and_then(|workout| workout.get("dayWise"))
        .is_some_and(Value::is_array)
}
