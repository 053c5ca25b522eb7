//! `steps` crate — the step model and the pluggable policies applied to it.
//!
//! Every policy the engine consults while building or evaluating a workflow
//! (concept extraction, step execution, condition evaluation) is a trait
//! defined here. The engine crate dispatches through these traits and ships
//! the reference implementations from [`policy`] as defaults.

pub mod error;
pub mod mock;
pub mod model;
pub mod name;
pub mod policy;
pub mod traits;

pub use error::StepError;
pub use model::{EvaluationContext, Step, StepType};
pub use policy::{AlwaysTrue, LineConceptExtractor, TypeBonusReward};
pub use traits::{ConceptExtractor, ConditionEvaluator, StepExecutor};
