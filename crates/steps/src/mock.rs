//! Test doubles for the policy traits.
//!
//! Useful in unit and integration tests where the reference policies would
//! hide the behaviour under test (a decision that fails, a step that errors).

use std::sync::{Arc, Mutex};

use crate::{ConditionEvaluator, EvaluationContext, Step, StepError, StepExecutor};

/// A condition that returns a scripted sequence of answers and records the
/// name of every step it was asked about.
///
/// Once the script is exhausted the last answer repeats.
pub struct MockCondition {
    answers: Vec<bool>,
    /// Names of the decision steps evaluated, in call order.
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockCondition {
    /// Always answer `value`.
    pub fn fixed(value: bool) -> Self {
        Self::scripted(vec![value])
    }

    /// Answer from `answers` in order, repeating the last one.
    pub fn scripted(answers: Vec<bool>) -> Self {
        Self {
            answers,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of times the condition has been evaluated.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }
}

impl ConditionEvaluator for MockCondition {
    fn evaluate(&self, step: &Step, _ctx: &EvaluationContext) -> bool {
        let Ok(mut calls) = self.calls.lock() else {
            return false;
        };
        let index = calls.len();
        calls.push(step.name().to_owned());
        self.answers
            .get(index)
            .or_else(|| self.answers.last())
            .copied()
            .unwrap_or(false)
    }
}

/// Behaviour injected into [`MockExecutor`] at construction time.
pub enum MockBehaviour {
    /// Return the same reward for every step.
    Reward(f64),
    /// Fail on the step with this name, reward `1.0` elsewhere.
    FailOn(String),
}

/// An executor that records every step it runs.
pub struct MockExecutor {
    pub behaviour: MockBehaviour,
    /// Names of executed steps, in call order.
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockExecutor {
    pub fn rewarding(reward: f64) -> Self {
        Self {
            behaviour: MockBehaviour::Reward(reward),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing_on(name: impl Into<String>) -> Self {
        Self {
            behaviour: MockBehaviour::FailOn(name.into()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Names of the steps executed so far.
    pub fn executed(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl StepExecutor for MockExecutor {
    fn execute(&self, step: &Step, _ctx: &EvaluationContext) -> Result<f64, StepError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(step.name().to_owned());
        }

        match &self.behaviour {
            MockBehaviour::Reward(r) => Ok(*r),
            MockBehaviour::FailOn(name) if name == step.name() => {
                Err(StepError::Fatal(format!("scripted failure on {name}")))
            }
            MockBehaviour::FailOn(_) => Ok(1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StepType;

    #[test]
    fn scripted_condition_repeats_last_answer() {
        let cond = MockCondition::scripted(vec![true, false]);
        let step = Step::new("step_1", StepType::Decision, "ok?", vec![]);
        let ctx = EvaluationContext::new();

        assert!(cond.evaluate(&step, &ctx));
        assert!(!cond.evaluate(&step, &ctx));
        assert!(!cond.evaluate(&step, &ctx));
        assert_eq!(cond.call_count(), 3);
    }

    #[test]
    fn executor_fails_only_on_named_step() {
        let exec = MockExecutor::failing_on("step_2");
        let ctx = EvaluationContext::new();
        let ok = Step::new("step_1", StepType::Process, "a", vec![]);
        let bad = Step::new("step_2", StepType::Process, "b", vec![]);

        assert_eq!(exec.execute(&ok, &ctx), Ok(1.0));
        assert!(matches!(exec.execute(&bad, &ctx), Err(StepError::Fatal(_))));
        assert_eq!(exec.executed(), vec!["step_1", "step_2"]);
    }
}
