//! Step-level error type.

use thiserror::Error;

/// Errors returned by a [`StepExecutor`](crate::StepExecutor).
///
/// The reference reward policy never fails; substitute executors use this to
/// abort the traversal with a reason the engine reports alongside the step name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StepError {
    /// Permanent failure; the evaluation stops at this step.
    #[error("fatal step error: {0}")]
    Fatal(String),
}
