//! The three-stage pipeline: build → render → evaluate.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use steps::EvaluationContext;

use crate::builder::WorkflowBuilder;
use crate::evaluator::Evaluator;
use crate::pseudocode::generate_pseudocode;
use crate::{EngineError, Workflow};

/// Everything one pipeline run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub workflow: Workflow,
    pub pseudocode: String,
    pub reward: f64,
}

impl From<PipelineOutput> for (Workflow, String, f64) {
    fn from(out: PipelineOutput) -> Self {
        (out.workflow, out.pseudocode, out.reward)
    }
}

/// A builder and an evaluator bundled together. Holds no per-run state, so one
/// instance can serve any number of calls (from any number of threads).
#[derive(Default)]
pub struct Pipeline {
    builder: WorkflowBuilder,
    evaluator: Evaluator,
}

impl Pipeline {
    pub fn new(builder: WorkflowBuilder, evaluator: Evaluator) -> Self {
        Self { builder, evaluator }
    }

    #[instrument(skip_all, fields(prompt_len = prompt.len()))]
    pub fn process(&self, prompt: &str, ctx: &EvaluationContext) -> Result<PipelineOutput, EngineError> {
        let workflow = self.builder.build(prompt);
        let pseudocode = generate_pseudocode(&workflow);
        let reward = self.evaluator.run(&workflow, ctx)?.reward;

        info!("pipeline produced {} steps, reward {}", workflow.len(), reward);

        Ok(PipelineOutput {
            workflow,
            pseudocode,
            reward,
        })
    }
}

/// Run the reference pipeline on `prompt`.
pub fn process_workflow(prompt: &str, ctx: &EvaluationContext) -> Result<PipelineOutput, EngineError> {
    Pipeline::default().process(prompt, ctx)
}
