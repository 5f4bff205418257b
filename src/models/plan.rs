// ABOUTME: Generated plan model and the generate-plan request payload
// ABOUTME: Workout days, exercises, diet lists and the prompt options derived from a request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Generated Plan
// ============================================================================

/// Repetition target: a count or a free-form description such as `"8-12"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reps {
    /// Fixed count
    Count(u32),
    /// Free-form text
    Text(String),
}

/// One exercise within a training day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Exercise name, never empty
    pub name: String,
    /// Number of sets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    /// Repetitions per set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<Reps>,
    /// Rest between sets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<String>,
    /// Coaching notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One training day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    /// Day label, never empty
    pub day: String,
    /// Exercises for the day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercises: Option<Vec<Exercise>>,
}

/// Workout section of a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    /// Ordered training days, possibly empty
    pub day_wise: Vec<DayPlan>,
}

/// Diet section of a plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietPlan {
    /// Breakfast suggestions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakfast: Option<Vec<String>>,
    /// Lunch suggestions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch: Option<Vec<String>>,
    /// Dinner suggestions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dinner: Option<Vec<String>>,
    /// Snack suggestions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snacks: Option<Vec<String>>,
}

/// A complete, strictly valid plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPlan {
    /// Workout section
    pub workout_plan: WorkoutPlan,
    /// Diet section
    pub diet_plan: DietPlan,
    /// Short actionable tips
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<Vec<String>>,
    /// One motivational quote
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivation_quote: Option<String>,
    /// In-band error reported by the model itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Request Payload
// ============================================================================

/// Body of a generate-plan request
///
/// `user` stays untyped until the profile shape check has produced its
/// per-field report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratePlanRequest {
    /// Raw user profile; `null` or absent is treated as an empty object
    #[serde(default)]
    pub user: Value,
    /// Fallback goal used when the profile lists none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    /// Partial previous plan used as a seed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Value>,
}

impl GeneratePlanRequest {
    /// Read the request leniently from any JSON value
    ///
    /// Missing or mistyped members are treated as absent so that the profile
    /// check, not the decoder, reports what is wrong.
    #[must_use]
    pub fn from_value(body: &Value) -> Self {
        Self {
            user: body.get("user").cloned().unwrap_or(Value::Null),
            goal: body.get("goal").and_then(Value::as_str).map(str::to_owned),
            plan: body.get("plan").filter(|plan| !plan.is_null()).cloned(),
        }
    }

    /// The user value with `null` replaced by an empty object
    #[must_use]
    pub fn user_or_empty(&self) -> Value {
        if self.user.is_null() {
            Value::Object(serde_json::Map::new())
        } else {
            self.user.clone()
        }
    }

    /// Prompt options carried by this request
    #[must_use]
    pub fn prompt_options(&self) -> PromptOptions {
        PromptOptions {
            goal: self.goal.clone(),
            plan: self.plan.clone(),
        }
    }
}

/// Extra context for prompt construction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptOptions {
    /// Goal used when the profile lists no goals
    pub goal: Option<String>,
    /// Partial previous plan
    pub plan: Option<Value>,
}

impl PromptOptions {
    /// Preferred plan duration taken from the seed plan's `durationWeeks`
    ///
    /// Zero, empty and non-scalar values are ignored.
    #[must_use]
    pub fn duration_weeks(&self) -> Option<String> {
        match self.plan.as_ref()?.get("durationWeeks")? {
            Value::Number(n) if n.as_f64().is_some_and(|v| v != 0.0) => Some(n.to_string()),
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }
}
