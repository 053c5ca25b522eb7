//! Engine-level error types.

use steps::StepError;
use thiserror::Error;

/// Errors produced by the workflow engine (validation + evaluation).
///
/// An empty workflow is never an error: every stage handles it as a
/// zero-length input.
#[derive(Debug, Error)]
pub enum EngineError {
    // ------ Validation errors ------

    /// A connection does not parse as `step_<n>` or names an ordinal outside
    /// the workflow.
    #[error("step '{step}' references '{reference}': {reason}")]
    MalformedReference {
        step: String,
        reference: String,
        reason: &'static str,
    },

    /// A step's name does not match its position in the workflow.
    #[error("step at index {index} is named '{name}', expected 'step_{}'", .index + 1)]
    MisnamedStep { index: usize, name: String },

    // ------ Evaluation errors ------

    /// Traversal visited more steps than the configured ceiling allows,
    /// which only happens when the graph contains a cycle.
    #[error("traversal exceeded {limit} steps at '{at}'; workflow likely contains a cycle")]
    UnboundedTraversal { limit: usize, at: String },

    /// A step executor failed; the evaluation is aborted.
    #[error("step '{step}' failed: {source}")]
    StepFailed {
        step: String,
        #[source]
        source: StepError,
    },
}
