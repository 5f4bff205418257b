// ABOUTME: Result of one plan generation request, successful or terminal
// ABOUTME: Maps every pipeline exit to its JSON body and HTTP status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::schema::FieldErrors;

/// How a plan request ended
///
/// Relaxed successes carry their warning and every variant that involved the
/// model keeps the raw text it produced.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    /// First response was strictly valid
    Strict {
        /// Plan exactly as parsed, unknown keys included
        plan: Value,
        /// Model text
        raw: String,
    },
    /// First response failed strict validation but has a `dayWise` array
    Heuristic {
        /// Plan exactly as parsed
        plan: Value,
        /// Strict validation errors
        validation_warning: FieldErrors,
        /// Model text
        raw: String,
    },
    /// Repair response was strictly valid
    Repaired {
        /// Repaired plan exactly as parsed
        plan: Value,
        /// Original then repaired model text
        raw: [String; 2],
    },
    /// The user profile was rejected before any model call
    InvalidInput {
        /// Profile validation errors
        details: FieldErrors,
    },
    /// No JSON could be recovered from the first response
    Unparseable {
        /// Model text
        raw: String,
    },
    /// Repair response was JSON but still invalid
    RepairNotConverged {
        /// Validation errors of the repaired JSON
        validation: FieldErrors,
        /// Original then repaired model text
        raw: [String; 2],
    },
    /// Repair call failed or returned no JSON
    Unrepaired {
        /// Validation errors of the original JSON
        validation: FieldErrors,
        /// Original parsed JSON
        parsed: Value,
    },
}

impl PlanOutcome {
    /// Whether a plan is returned
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(
            self,
            Self::Strict { .. } | Self::Heuristic { .. } | Self::Repaired { .. }
        )
    }

    /// Short label for logs
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Strict { .. } => "strict",
            Self::Heuristic { .. } => "heuristic",
            Self::Repaired { .. } => "repaired",
            Self::InvalidInput { .. } => "invalid_input",
            Self::Unparseable { .. } => "unparseable",
            Self::RepairNotConverged { .. } => "repair_not_converged",
            Self::Unrepaired { .. } => "unrepaired",
        }
    }

    /// HTTP status for this outcome
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::Strict { .. } | Self::Heuristic { .. } | Self::Repaired { .. } => StatusCode::OK,
            Self::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            Self::Unparseable { .. } | Self::RepairNotConverged { .. } | Self::Unrepaired { .. } => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    /// JSON response body
    #[must_use]
    pub fn to_body(&self) -> Value {
        match self {
            Self::Strict { plan, raw } => json!({ "plan": plan, "raw": raw }),
            Self::Heuristic {
                plan,
                validation_warning,
                raw,
            } => json!({
                "plan": plan,
                "validationWarning": validation_warning,
                "raw": raw,
            }),
            Self::Repaired { plan, raw } => json!({ "plan": plan, "raw": raw }),
            Self::InvalidInput { details } => json!({
                "error": "Invalid user payload",
                "details": details,
            }),
            Self::Unparseable { raw } => json!({
                "error": "Failed to parse plan from LLM",
                "raw": raw,
            }),
            Self::RepairNotConverged { validation, raw } => json!({
                "error": "LLM returned JSON but it still failed schema validation",
                "validation": validation,
                "raw": raw,
            }),
            Self::Unrepaired { validation, parsed } => json!({
                "error": "LLM returned JSON that failed schema validation",
                "validation": validation,
                "parsed": parsed,
            }),
        }
    }
}

impl IntoResponse for PlanOutcome {
    fn into_response(self) -> Response {
        (self.http_status(), Json(self.to_body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statuses() {
        let unparseable = PlanOutcome::Unparseable { raw: "nope".into() };
        assert_eq!(unparseable.http_status(), StatusCode::BAD_GATEWAY);
        assert!(!unparseable.is_success());

        let invalid = PlanOutcome::InvalidInput {
            details: FieldErrors::root("bad"),
        };
        assert_eq!(invalid.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_repair_not_converged_body_keeps_both_texts() {
        let outcome = PlanOutcome::RepairNotConverged {
            validation: FieldErrors::root("Required"),
            raw: ["first".into(), "second".into()],
        };
        assert_eq!(
            outcome.to_body(),
            json!({
                "error": "LLM returned JSON but it still failed schema validation",
                "validation": {"_root": ["Required"]},
                "raw": ["first", "second"]
            })
        );
    }
}
