// ABOUTME: Prompt construction for plan generation and the single repair re-prompt
// ABOUTME: Renders the profile into a strict JSON-only instruction with a literal response schema
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompts
//!
//! Both builders are pure: the same inputs always render the same text. The
//! response schema example is kept in a text file next to this module and
//! loaded at compile time.

use serde_json::Value;

use crate::models::{PromptOptions, UserProfile};
use crate::schema::FieldErrors;

/// Literal example of the expected response, embedded in every plan prompt
pub const PLAN_RESPONSE_SCHEMA: &str = include_str!("plan_response_schema.txt");

const ROLE: &str = "You are an expert fitness trainer and nutritionist.";

const JSON_ONLY: &str = "Return ONLY valid JSON and nothing else. If you cannot produce the object, \
return an error field in JSON.";

const SCHEMA_INTRO: &str = "Respond using this exact JSON schema (keys and types):";

const CONTEXT_HEADER: &str = "User context (use these values to personalize):";

const CONSTRAINTS: &str = "Constraints: Keep exercises safe and appropriate for the stated fitness \
level. Prefer minimal equipment when user indicates 'Home'. Make diet recommendations consistent \
with dietary preferences when provided. Provide short, actionable tips and one motivational quote.";

const OUTPUT_RULES: &str = "Important: Output must be parseable JSON. Do not include markdown, code \
fences, or extra commentary. If any value is unknown, provide an appropriate generic suggestion.";

/// Render the plan generation prompt
#[must_use]
pub fn build_plan_prompt(profile: &UserProfile, options: &PromptOptions) -> String {
    let mut paragraphs: Vec<String> = vec![
        ROLE.to_owned(),
        JSON_ONLY.to_owned(),
        SCHEMA_INTRO.to_owned(),
        PLAN_RESPONSE_SCHEMA.trim_end().to_owned(),
        CONTEXT_HEADER.to_owned(),
        user_context(profile, options),
    ];

    if let Some(weeks) = options.duration_weeks() {
        paragraphs.push(format!("The user prefers a plan lasting {weeks} week(s)."));
    }

    paragraphs.push(CONSTRAINTS.to_owned());
    paragraphs.push(OUTPUT_RULES.to_owned());
    paragraphs.join("\n\n")
}

/// `Key: value.` clauses for every present profile field
fn user_context(profile: &UserProfile, options: &PromptOptions) -> String {
    let mut clauses = Vec::new();

    if !profile.name.is_empty() {
        clauses.push(format!("Name: {}.", profile.name));
    }
    if let Some(age) = profile.age.filter(|age| *age > 0) {
        clauses.push(format!("Age: {age}."));
    }
    if let Some(gender) = profile.gender {
        clauses.push(format!("Gender: {gender}."));
    }
    if let Some(height) = profile.height_cm.filter(|h| *h != 0.0) {
        clauses.push(format!("HeightCm: {height}."));
    }
    if let Some(weight) = profile.weight_kg.filter(|w| *w != 0.0) {
        clauses.push(format!("WeightKg: {weight}."));
    }
    if let Some(level) = profile.activity_level {
        clauses.push(format!("ActivityLevel: {level}."));
    }

    match (&profile.goals, options.goal.as_deref()) {
        (Some(goals), _) if !goals.is_empty() => {
            clauses.push(format!("Goals: {}.", goals.join(", ")));
        }
        (_, Some(goal)) if !goal.is_empty() => clauses.push(format!("Goal: {goal}.")),
        _ => {}
    }

    clauses.join(" ")
}

/// Render the repair re-prompt for output that failed validation
///
/// `errors` is rendered as indented JSON and `parsed` compactly, so the model
/// sees exactly what it produced and what was wrong with it.
#[must_use]
pub fn build_repair_prompt(errors: &FieldErrors, parsed: &Value) -> String {
    let errors_json =
        serde_json::to_string_pretty(errors).unwrap_or_else(|_| errors.to_value().to_string());

    format!(
        "The previous response attempted to return a fitness plan in JSON but it does not match \
         the required schema. Validation errors:\n{errors_json}\n\nHere is the JSON the model \
         previously produced:\n{parsed}\n\nPlease return only the corrected JSON object that \
         conforms exactly to the schema previously provided (workoutPlan.dayWise, dietPlan, tips, \
         motivationQuote). Do NOT include any explanation, markdown, or extra text. Return valid \
         JSON only."
    )
}
