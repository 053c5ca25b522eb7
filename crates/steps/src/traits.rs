//! The policy traits — the seams the engine dispatches through.

use crate::{EvaluationContext, Step, StepError};

/// Turns a free-text prompt into an ordered list of concepts, one per step.
pub trait ConceptExtractor: Send + Sync {
    fn extract(&self, prompt: &str) -> Vec<String>;
}

/// Executes a visited step and returns the reward it earns.
pub trait StepExecutor: Send + Sync {
    /// Run `step` with the caller's `ctx` and return its reward contribution.
    fn execute(&self, step: &Step, ctx: &EvaluationContext) -> Result<f64, StepError>;
}

/// Decides whether a decision step's "true" branch is taken.
pub trait ConditionEvaluator: Send + Sync {
    fn evaluate(&self, step: &Step, ctx: &EvaluationContext) -> bool;
}

impl<F> ConditionEvaluator for F
where
    F: Fn(&Step, &EvaluationContext) -> bool + Send + Sync,
{
    fn evaluate(&self, step: &Step, ctx: &EvaluationContext) -> bool {
        self(step, ctx)
    }
}
