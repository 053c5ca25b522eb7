//! Workflow evaluation engine.
//!
//! `Evaluator` walks the graph from its first step:
//! 1. Executes each visited step through a `StepExecutor` and adds its reward.
//! 2. Stops on a terminal step.
//! 3. On a decision step, asks the `ConditionEvaluator`; a true answer follows
//!    the first connection, a false one ends the walk.
//! 4. On a process step, follows the first connection if there is one.
//! 5. Resolves every connection by ordinal and fails on anything malformed.
//! 6. Fails with `UnboundedTraversal` once the visit count passes the ceiling.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use steps::{AlwaysTrue, ConditionEvaluator, EvaluationContext, Step, StepExecutor, StepType, TypeBonusReward};

use crate::{EngineError, Workflow};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tuning knobs for the evaluator.
#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    /// Traversal may visit at most `len * ceiling_factor` steps (never fewer
    /// than `len`) before it is treated as a cycle.
    pub ceiling_factor: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self { ceiling_factor: 4 }
    }
}

impl EvaluatorConfig {
    /// Visit ceiling for a workflow of `len` steps.
    pub fn ceiling(&self, len: usize) -> usize {
        len.saturating_mul(self.ceiling_factor.max(1))
    }
}

// ---------------------------------------------------------------------------
// Output of a completed evaluation
// ---------------------------------------------------------------------------

/// Why the traversal stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HaltReason {
    /// The workflow had no steps.
    Empty,
    /// A terminal step was executed.
    Terminal,
    /// The last visited step had no outgoing connection.
    NoNextStep,
    /// A decision's condition came back false.
    ConditionUnmet,
}

/// The result of walking a workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Sum of the rewards of every visited step.
    pub reward: f64,
    /// Names of the visited steps, in visit order.
    pub visited: Vec<String>,
    pub halt: HaltReason,
}

// ---------------------------------------------------------------------------
// Evaluator
// ---------------------------------------------------------------------------

/// Stateless walker over a workflow graph.
///
/// Holds only its policies and config; every call to [`Evaluator::run`]
/// operates on the workflow and context it is given.
pub struct Evaluator {
    executor: Box<dyn StepExecutor>,
    condition: Box<dyn ConditionEvaluator>,
    config: EvaluatorConfig,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(TypeBonusReward, AlwaysTrue, EvaluatorConfig::default())
    }
}

impl Evaluator {
    pub fn new(
        executor: impl StepExecutor + 'static,
        condition: impl ConditionEvaluator + 'static,
        config: EvaluatorConfig,
    ) -> Self {
        Self {
            executor: Box::new(executor),
            condition: Box::new(condition),
            config,
        }
    }

    /// Reference policies with a custom config.
    pub fn with_config(config: EvaluatorConfig) -> Self {
        Self::new(TypeBonusReward, AlwaysTrue, config)
    }

    /// Replace the condition policy, keeping everything else.
    pub fn with_condition(mut self, condition: impl ConditionEvaluator + 'static) -> Self {
        self.condition = Box::new(condition);
        self
    }

    /// Replace the step executor, keeping everything else.
    pub fn with_executor(mut self, executor: impl StepExecutor + 'static) -> Self {
        self.executor = Box::new(executor);
        self
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Walk the workflow and report the reward, the path and why it stopped.
    ///
    /// # Errors
    /// [`EngineError::MalformedReference`] for an unresolvable connection,
    /// [`EngineError::UnboundedTraversal`] when the visit ceiling is exceeded,
    /// [`EngineError::StepFailed`] when the step executor fails.
    #[instrument(skip_all, fields(steps = workflow.len()))]
    pub fn run(&self, workflow: &Workflow, ctx: &EvaluationContext) -> Result<EvaluationReport, EngineError> {
        let Some(entry) = workflow.first() else {
            debug!("empty workflow, nothing to evaluate");
            return Ok(EvaluationReport {
                reward: 0.0,
                visited: Vec::new(),
                halt: HaltReason::Empty,
            });
        };

        let limit = self.config.ceiling(workflow.len());
        let mut reward = 0.0;
        let mut visited: Vec<String> = Vec::new();
        let mut current = entry;

        let halt = loop {
            if visited.len() == limit {
                warn!("traversal ceiling of {} reached at '{}'", limit, current.name());
                return Err(EngineError::UnboundedTraversal {
                    limit,
                    at: current.name().to_owned(),
                });
            }

            let step_reward = self
                .executor
                .execute(current, ctx)
                .map_err(|source| EngineError::StepFailed {
                    step: current.name().to_owned(),
                    source,
                })?;
            reward += step_reward;
            visited.push(current.name().to_owned());
            debug!("step '{}' ({}) earned {}", current.name(), current.step_type(), step_reward);

            match self.transition(workflow, current, ctx)? {
                Transition::Goto(next) => current = next,
                Transition::Halt(reason) => break reason,
            }
        };

        info!("evaluation halted ({:?}) after {} steps, reward {}", halt, visited.len(), reward);

        Ok(EvaluationReport { reward, visited, halt })
    }

    fn transition<'w>(
        &self,
        workflow: &'w Workflow,
        step: &Step,
        ctx: &EvaluationContext,
    ) -> Result<Transition<'w>, EngineError> {
        let target = match step.step_type() {
            StepType::Terminal => return Ok(Transition::Halt(HaltReason::Terminal)),
            StepType::Decision => {
                if !self.condition.evaluate(step, ctx) {
                    debug!("condition of '{}' unmet", step.name());
                    return Ok(Transition::Halt(HaltReason::ConditionUnmet));
                }
                step.next()
            }
            StepType::Process => step.next(),
        };

        match target {
            Some(reference) => {
                let (_, next) = workflow.resolve(step.name(), reference)?;
                Ok(Transition::Goto(next))
            }
            None => Ok(Transition::Halt(HaltReason::NoNextStep)),
        }
    }
}

enum Transition<'w> {
    Goto(&'w Step),
    Halt(HaltReason),
}

/// Evaluate `workflow` with the reference policies and return the reward.
pub fn evaluate_workflow(workflow: &Workflow, ctx: &EvaluationContext) -> Result<f64, EngineError> {
    Evaluator::default().run(workflow, ctx).map(|report| report.reward)
}
