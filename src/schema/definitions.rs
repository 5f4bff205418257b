// ABOUTME: Shape definitions for the user profile and the generated plan
// ABOUTME: Built once per process and shared by validation and repair
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::OnceLock;

use super::shape::{Field, Shape};
use crate::models::{ActivityLevel, Gender};

static USER_PROFILE_SHAPE: OnceLock<Shape> = OnceLock::new();
static GENERATED_PLAN_SHAPE: OnceLock<Shape> = OnceLock::new();

/// Accepted structure of a user profile
pub fn user_profile_shape() -> &'static Shape {
    USER_PROFILE_SHAPE.get_or_init(|| {
        Shape::Object(vec![
            Field::optional("id", Shape::string()),
            Field::required("name", Shape::non_empty_string()),
            Field::optional("age", Shape::positive_integer()),
            Field::optional("gender", Shape::Enum(Gender::VALUES)),
            Field::optional("heightCm", Shape::positive_number()),
            Field::optional("weightKg", Shape::positive_number()),
            Field::optional("activityLevel", Shape::Enum(ActivityLevel::VALUES)),
            Field::optional("goals", Shape::array_of(Shape::string())),
        ])
    })
}

/// Accepted structure of a generated plan
pub fn generated_plan_shape() -> &'static Shape {
    GENERATED_PLAN_SHAPE.get_or_init(|| {
        let exercise = Shape::Object(vec![
            Field::required("name", Shape::non_empty_string()),
            Field::optional("sets", Shape::positive_integer()),
            Field::optional(
                "reps",
                Shape::OneOf(vec![Shape::positive_integer(), Shape::string()]),
            ),
            Field::optional("rest", Shape::string()),
            Field::optional("description", Shape::string()),
        ]);
        let day = Shape::Object(vec![
            Field::required("day", Shape::non_empty_string()),
            Field::optional("exercises", Shape::array_of(exercise)),
        ]);
        let meals = || Shape::array_of(Shape::string());

        Shape::Object(vec![
            Field::required(
                "workoutPlan",
                Shape::Object(vec![Field::required("dayWise", Shape::array_of(day))]),
            ),
            Field::required(
                "dietPlan",
                Shape::Object(vec![
                    Field::optional("breakfast", meals()),
                    Field::optional("lunch", meals()),
                    Field::optional("dinner", meals()),
                    Field::optional("snacks", meals()),
                ]),
            ),
            Field::optional("tips", Shape::array_of(Shape::string())),
            Field::optional("motivationQuote", Shape::string()),
            Field::optional("error", Shape::string()),
        ])
    })
}
