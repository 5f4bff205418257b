// ABOUTME: Shape tree describing accepted JSON structures and the walker that checks values
// ABOUTME: Collects every structural violation with its field path and a readable message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde_json::{Map, Value};

use super::{FieldErrors, ROOT_PATH};

/// Largest accepted whole number; integer fields deserialize into `u32`
pub const INTEGER_MAX: u64 = 4_294_967_295;

/// Accepted structure of a JSON value
#[derive(Debug, Clone)]
pub enum Shape {
    /// Object with known fields; unknown keys are ignored
    Object(Vec<Field>),
    /// Array whose every element matches the inner shape
    Array(Box<Self>),
    /// String with a minimum character count
    String {
        /// Minimum number of characters
        min_len: usize,
    },
    /// Whole number up to [`INTEGER_MAX`]; `3.0` counts as whole
    Integer {
        /// Must be strictly greater than zero
        positive: bool,
    },
    /// Any number
    Number {
        /// Must be strictly greater than zero
        positive: bool,
    },
    /// One of a closed set of strings
    Enum(&'static [&'static str]),
    /// Matches if any alternative matches
    OneOf(Vec<Self>),
}

impl Shape {
    /// Any string
    #[must_use]
    pub const fn string() -> Self {
        Self::String { min_len: 0 }
    }

    /// Non-empty string
    #[must_use]
    pub const fn non_empty_string() -> Self {
        Self::String { min_len: 1 }
    }

    /// Positive whole number
    #[must_use]
    pub const fn positive_integer() -> Self {
        Self::Integer { positive: true }
    }

    /// Positive number
    #[must_use]
    pub const fn positive_number() -> Self {
        Self::Number { positive: true }
    }

    /// Array of `item`
    #[must_use]
    pub fn array_of(item: Self) -> Self {
        Self::Array(Box::new(item))
    }
}

/// Named member of an object shape
#[derive(Debug, Clone)]
pub struct Field {
    /// JSON key
    pub name: &'static str,
    /// Accepted value shape
    pub shape: Shape,
    /// Whether the key must be present
    pub required: bool,
}

impl Field {
    /// Field that must be present
    #[must_use]
    pub const fn required(name: &'static str, shape: Shape) -> Self {
        Self {
            name,
            shape,
            required: true,
        }
    }

    /// Field that may be absent; an explicit `null` is still a violation
    #[must_use]
    pub const fn optional(name: &'static str, shape: Shape) -> Self {
        Self {
            name,
            shape,
            required: false,
        }
    }
}

/// Walk `value` against `shape` and report every violation
#[must_use]
pub fn check(value: &Value, shape: &Shape) -> FieldErrors {
    let mut errors = FieldErrors::new();
    walk(value, shape, "", &mut errors);
    errors
}

fn walk(value: &Value, shape: &Shape, path: &str, errors: &mut FieldErrors) {
    let at = if path.is_empty() { ROOT_PATH } else { path };
    match shape {
        Shape::Object(fields) => match value {
            Value::Object(map) => walk_fields(map, fields, path, errors),
            other => errors.push(at, mismatch("object", other)),
        },
        Shape::Array(item) => match value {
            Value::Array(items) => {
                for (index, element) in items.iter().enumerate() {
                    walk(element, item, &format!("{path}[{index}]"), errors);
                }
            }
            other => errors.push(at, mismatch("array", other)),
        },
        Shape::String { min_len } => match value {
            Value::String(s) if s.chars().count() < *min_len => errors.push(
                at,
                format!("String must contain at least {min_len} character(s)"),
            ),
            Value::String(_) => {}
            other => errors.push(at, mismatch("string", other)),
        },
        Shape::Integer { positive } => match value {
            Value::Number(n) if is_whole(n) => {
                let v = n.as_f64().unwrap_or_default();
                if *positive && v <= 0.0 {
                    errors.push(at, "Number must be greater than 0");
                } else if v > INTEGER_MAX as f64 {
                    errors.push(
                        at,
                        format!("Number must be less than or equal to {INTEGER_MAX}"),
                    );
                }
            }
            Value::Number(_) => errors.push(at, "Expected integer, received float"),
            other => errors.push(at, mismatch("number", other)),
        },
        Shape::Number { positive } => match value {
            Value::Number(n) => {
                if *positive && n.as_f64().is_some_and(|v| v <= 0.0) {
                    errors.push(at, "Number must be greater than 0");
                }
            }
            other => errors.push(at, mismatch("number", other)),
        },
        Shape::Enum(allowed) => {
            let expected = allowed
                .iter()
                .map(|v| format!("'{v}'"))
                .collect::<Vec<_>>()
                .join(" | ");
            match value {
                Value::String(s) if allowed.contains(&s.as_str()) => {}
                Value::String(s) => errors.push(
                    at,
                    format!("Invalid enum value. Expected {expected}, received '{s}'"),
                ),
                other => errors.push(
                    at,
                    format!("Expected {expected}, received {}", type_name(other)),
                ),
            }
        }
        Shape::OneOf(alternatives) => {
            let matched = alternatives
                .iter()
                .any(|alternative| check(value, alternative).is_empty());
            if !matched {
                errors.push(at, "Invalid input");
            }
        }
    }
}

/// Copy of `value` with whole numbers under integer shapes written as JSON integers
///
/// Lets `3.0` deserialize into integer fields once [`check`] has accepted it.
/// Keys the shape does not describe are copied untouched.
#[must_use]
pub fn normalize(value: &Value, shape: &Shape) -> Value {
    match (shape, value) {
        (Shape::Object(fields), Value::Object(map)) => {
            let mut out = map.clone();
            for field in fields {
                if let Some(child) = map.get(field.name) {
                    out.insert(field.name.to_owned(), normalize(child, &field.shape));
                }
            }
            Value::Object(out)
        }
        (Shape::Array(item), Value::Array(items)) => {
            Value::Array(items.iter().map(|element| normalize(element, item)).collect())
        }
        (Shape::Integer { .. }, Value::Number(n)) if !n.is_i64() && !n.is_u64() && is_whole(n) => {
            n.as_f64()
                .filter(|v| *v >= 0.0 && *v <= INTEGER_MAX as f64)
                .map_or_else(|| value.clone(), |v| Value::from(v as u64))
        }
        (Shape::OneOf(alternatives), _) => alternatives
            .iter()
            .find(|alternative| check(value, alternative).is_empty())
            .map_or_else(|| value.clone(), |alternative| normalize(value, alternative)),
        _ => value.clone(),
    }
}

fn is_whole(n: &serde_json::Number) -> bool {
    n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|v| v.is_finite() && v.fract() == 0.0)
}

fn walk_fields(map: &Map<String, Value>, fields: &[Field], path: &str, errors: &mut FieldErrors) {
    for field in fields {
        let child = if path.is_empty() {
            field.name.to_owned()
        } else {
            format!("{path}.{}", field.name)
        };
        match map.get(field.name) {
            Some(value) => walk(value, &field.shape, &child, errors),
            None if field.required => errors.push(child, "Required"),
            None => {}
        }
    }
}

fn mismatch(expected: &str, received: &Value) -> String {
    format!("Expected {expected}, received {}", type_name(received))
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
