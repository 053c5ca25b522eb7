//! Reference policies: line-based concept extraction, the type-bonus reward
//! and the constant-true condition.

use crate::{ConceptExtractor, ConditionEvaluator, EvaluationContext, Step, StepError, StepExecutor, StepType};

// ---------------------------------------------------------------------------
// Concept extraction
// ---------------------------------------------------------------------------

/// One concept per non-blank line, text kept verbatim (indentation included).
///
/// Placeholder for real concept extraction: no grouping, no merging.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineConceptExtractor;

impl ConceptExtractor for LineConceptExtractor {
    fn extract(&self, prompt: &str) -> Vec<String> {
        prompt
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .map(str::to_owned)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Reward
// ---------------------------------------------------------------------------

/// Reward every executed step earns regardless of type.
pub const BASE_REWARD: f64 = 0.1;

/// Fixed reward: [`BASE_REWARD`] plus a per-type bonus.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeBonusReward;

impl TypeBonusReward {
    pub fn bonus(step_type: StepType) -> f64 {
        match step_type {
            StepType::Process => 0.2,
            StepType::Decision => 0.3,
            StepType::Terminal => 0.4,
        }
    }
}

impl StepExecutor for TypeBonusReward {
    fn execute(&self, step: &Step, _ctx: &EvaluationContext) -> Result<f64, StepError> {
        Ok(BASE_REWARD + Self::bonus(step.step_type()))
    }
}

// ---------------------------------------------------------------------------
// Condition
// ---------------------------------------------------------------------------

/// Every decision takes its "true" branch.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysTrue;

impl ConditionEvaluator for AlwaysTrue {
    fn evaluate(&self, _step: &Step, _ctx: &EvaluationContext) -> bool {
        true
    }
}
