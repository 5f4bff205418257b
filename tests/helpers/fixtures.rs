// ABOUTME: JSON fixtures for user profiles and generated plans
// ABOUTME: Valid, partially valid and malformed shapes used across pipeline and route tests

use serde_json::{json, Value};

/// Complete, valid user profile
pub fn valid_profile() -> Value {
    json!({
        "id": "u-1",
        "name": "Alex",
        "age": 29,
        "gender": "female",
        "heightCm": 168.5,
        "weightKg": 61,
        "activityLevel": "moderate",
        "goals": ["build strength", "sleep better"]
    })
}

/// Plan that passes strict validation
pub fn valid_plan() -> Value {
    json!({
        "workoutPlan": {
            "dayWise": [
                {
                    "day": "Monday",
                    "exercises": [
                        { "name": "Squat", "sets": 3, "reps": 10, "rest": "90s" },
                        { "name": "Plank", "sets": 3, "reps": "45 seconds" }
                    ]
                },
                { "day": "Tuesday", "exercises": [] }
            ]
        },
        "dietPlan": {
            "breakfast": ["Oats with berries"],
            "lunch": ["Chicken salad"],
            "dinner": ["Salmon and rice"],
            "snacks": ["Greek yogurt"]
        },
        "tips": ["Warm up for five minutes"],
        "motivationQuote": "Small steps every day."
    })
}

/// Plan with a usable `dayWise` array but no `dietPlan`
pub fn plan_missing_diet() -> Value {
    let mut plan = valid_plan();
    plan.as_object_mut().unwrap().remove("dietPlan");
    plan
}

/// Plan-like object that fails validation and has no `dayWise` array
pub fn plan_without_day_wise() -> Value {
    json!({
        "workout": ["Squat", "Plank"],
        "dietPlan": { "breakfast": ["Oats"] }
    })
}

/// Generate-plan request body around `user`
pub fn plan_request(user: Value) -> Value {
    json!({ "user": user, "goal": "general fitness" })
}
