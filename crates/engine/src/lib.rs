//! `engine` crate — the workflow model, the builder, the pseudocode renderer,
//! the evaluator and the pipeline that composes them.

pub mod builder;
pub mod error;
pub mod evaluator;
pub mod models;
pub mod pipeline;
pub mod pseudocode;
pub mod validate;

pub use builder::{generate_workflow, WorkflowBuilder};
pub use error::EngineError;
pub use evaluator::{evaluate_workflow, EvaluationReport, Evaluator, EvaluatorConfig, HaltReason};
pub use models::Workflow;
pub use pipeline::{process_workflow, Pipeline, PipelineOutput};
pub use pseudocode::generate_pseudocode;
pub use validate::validate_references;

pub use steps::{EvaluationContext, Step, StepType};
