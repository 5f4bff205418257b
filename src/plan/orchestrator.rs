// ABOUTME: Plan generation orchestrator driving prompt, model call, recovery and repair
// ABOUTME: Classifies model output as strict, heuristic, repaired or a terminal failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::extract::{extract_json, is_truthy};
use super::outcome::PlanOutcome;
use crate::constants::generation;
use crate::errors::ProviderError;
use crate::llm::prompts::{build_plan_prompt, build_repair_prompt};
use crate::llm::{GenerationOptions, TextGenerator};
use crate::models::GeneratePlanRequest;
use crate::schema::{looks_like_plan, validate_plan, validate_profile, FieldErrors};

/// Drives one plan request through the recovery pipeline
#[derive(Clone)]
pub struct PlanGenerator {
    generator: Arc<dyn TextGenerator>,
}

impl PlanGenerator {
    /// Create an orchestrator over any text generator
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Options for the first generation call
    #[must_use]
    pub const fn plan_options() -> GenerationOptions {
        GenerationOptions {
            model: None,
            temperature: Some(generation::PLAN_TEMPERATURE),
            max_tokens: Some(generation::PLAN_MAX_TOKENS),
            retries: generation::PLAN_RETRIES,
        }
    }

    /// Options for the repair call
    #[must_use]
    pub const fn repair_options() -> GenerationOptions {
        GenerationOptions {
            model: None,
            temperature: Some(generation::REPAIR_TEMPERATURE),
            max_tokens: Some(generation::REPAIR_MAX_TOKENS),
            retries: generation::REPAIR_RETRIES,
        }
    }

    /// Generate a plan for `request`
    ///
    /// Invalid input and unusable model output are reported as
    /// [`PlanOutcome`] variants, not errors.
    ///
    /// # Errors
    ///
    /// Returns the provider error when the first generation call fails. A
    /// failed repair call is logged and reported as
    /// [`PlanOutcome::Unrepaired`] instead.
    #[instrument(skip_all, fields(provider = self.generator.name()))]
    pub async fn generate(&self, request: &GeneratePlanRequest) -> Result<PlanOutcome, ProviderError> {
        let profile = match validate_profile(&request.user_or_empty()) {
            Ok(profile) => profile,
            Err(details) => {
                info!(fields = details.len(), "Rejected invalid user profile");
                return Ok(PlanOutcome::InvalidInput { details });
            }
        };

        if let Some(seed) = request.plan.as_ref().filter(|seed| is_truthy(seed)) {
            if let Err(errors) = validate_plan(seed) {
                warn!(errors = %errors.to_value(), "Seed plan does not match the plan shape");
            }
        }

        let prompt = build_plan_prompt(&profile, &request.prompt_options());
        let first = self
            .generator
            .call_text(&prompt, &Self::plan_options())
            .await?;
        let text = first.text;

        let Some(parsed) = extract_json(&text).filter(is_truthy) else {
            warn!(chars = text.len(), "No JSON recovered from model output");
            return Ok(PlanOutcome::Unparseable { raw: text });
        };

        let validation = match validate_plan(&parsed) {
            Ok(_) => {
                debug!("Model output passed strict validation");
                return Ok(PlanOutcome::Strict {
                    plan: parsed,
                    raw: text,
                });
            }
            Err(errors) => errors,
        };

        if looks_like_plan(&parsed) {
            warn!(
                errors = %validation.to_value(),
                "Plan failed strict validation but appears usable, returning with warning"
            );
            return Ok(PlanOutcome::Heuristic {
                plan: parsed,
                validation_warning: validation,
                raw: text,
            });
        }

        Ok(self.repair(text, parsed, validation).await)
    }

    /// Single repair round-trip
    async fn repair(&self, text: String, parsed: Value, validation: FieldErrors) -> PlanOutcome {
        info!(fields = validation.len(), "Attempting plan repair");
        let prompt = build_repair_prompt(&validation, &parsed);

        match self
            .generator
            .call_text(&prompt, &Self::repair_options())
            .await
        {
            Ok(repair) => {
                if let Some(repaired) = extract_json(&repair.text).filter(is_truthy) {
                    return match validate_plan(&repaired) {
                        Ok(_) => {
                            info!("Repair produced a valid plan");
                            PlanOutcome::Repaired {
                                plan: repaired,
                                raw: [text, repair.text],
                            }
                        }
                        Err(errors) => PlanOutcome::RepairNotConverged {
                            validation: errors,
                            raw: [text, repair.text],
                        },
                    };
                }
                warn!("No JSON recovered from repair output");
            }
            Err(e) => warn!(error = %e, "Repair attempt failed"),
        }

        PlanOutcome::Unrepaired { validation, parsed }
    }
}

impl std::fmt::Debug for PlanGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanGenerator")
            .field("generator", &self.generator.name())
            .finish()
    }
}
