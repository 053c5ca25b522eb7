//! Workflow builder — prompt text in, linked step chain out.
//!
//! 1. Concepts are extracted through a [`ConceptExtractor`] (one per non-blank
//!    line by default).
//! 2. Each concept is typed: `?` anywhere makes it a decision, otherwise a
//!    case-insensitive `finish`/`end`/`complete` prefix makes it terminal,
//!    otherwise it is a process.
//! 3. Steps are linked into a strictly linear chain `step_1 → step_2 → …`.

use steps::name::step_name;
use steps::{ConceptExtractor, LineConceptExtractor, Step, StepType};
use tracing::debug;

use crate::Workflow;

const TERMINAL_PREFIXES: [&str; 3] = ["finish", "end", "complete"];

/// Classify a concept. Decision is checked before the terminal prefixes.
pub fn classify(concept: &str) -> StepType {
    if concept.contains('?') {
        return StepType::Decision;
    }

    let lowered = concept.to_lowercase();
    if TERMINAL_PREFIXES.iter().any(|p| lowered.starts_with(p)) {
        StepType::Terminal
    } else {
        StepType::Process
    }
}

/// Builds workflows from prompts using a pluggable concept extractor.
pub struct WorkflowBuilder {
    extractor: Box<dyn ConceptExtractor>,
}

impl Default for WorkflowBuilder {
    fn default() -> Self {
        Self::with_extractor(LineConceptExtractor)
    }
}

impl WorkflowBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `extractor` instead of line splitting. Typing and linking are unchanged.
    pub fn with_extractor(extractor: impl ConceptExtractor + 'static) -> Self {
        Self {
            extractor: Box::new(extractor),
        }
    }

    pub fn build(&self, prompt: &str) -> Workflow {
        let concepts = self.extractor.extract(prompt);
        let workflow = link(concepts);
        debug!(
            "built workflow with {} steps: {:?}",
            workflow.len(),
            workflow.iter().map(Step::step_type).collect::<Vec<_>>()
        );
        workflow
    }
}

fn link(concepts: Vec<String>) -> Workflow {
    let count = concepts.len();
    concepts
        .into_iter()
        .enumerate()
        .map(|(i, concept)| {
            let connections = if i + 1 < count {
                vec![step_name(i + 2)]
            } else {
                Vec::new()
            };
            Step::new(step_name(i + 1), classify(&concept), concept, connections)
        })
        .collect::<Vec<_>>()
        .into()
}

/// Build a workflow from `prompt` with the default line-based extractor.
pub fn generate_workflow(prompt: &str) -> Workflow {
    WorkflowBuilder::default().build(prompt)
}
