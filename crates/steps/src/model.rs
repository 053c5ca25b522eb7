//! The step model shared by the builder, renderer and evaluator.
//!
//! Defined here (in the steps crate) so both the engine and individual policy
//! implementations can import it without a circular dependency.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// EvaluationContext
// ---------------------------------------------------------------------------

/// Caller-defined key/value data threaded through step execution and
/// condition evaluation. The reference policies never read it.
pub type EvaluationContext = HashMap<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// StepType
// ---------------------------------------------------------------------------

/// What kind of node a step is; decides both rendering and traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepType {
    /// Does some work, then follows its single forward link.
    Process,
    /// Branches on a condition; follows its "true" link when the condition holds.
    Decision,
    /// Ends the traversal.
    Terminal,
}

impl StepType {
    /// Lowercase keyword used by the pseudocode grammar.
    pub fn keyword(self) -> &'static str {
        match self {
            StepType::Process => "process",
            StepType::Decision => "decision",
            StepType::Terminal => "terminal",
        }
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// A single node in the workflow graph.
///
/// Connections are step *names*, resolved against the owning workflow at
/// traversal time. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    name: String,
    step_type: StepType,
    instruction: String,
    #[serde(default)]
    connections: Vec<String>,
}

impl Step {
    pub fn new(
        name: impl Into<String>,
        step_type: StepType,
        instruction: impl Into<String>,
        connections: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            step_type,
            instruction: instruction.into(),
            connections,
        }
    }

    /// `step_<ordinal>`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn step_type(&self) -> StepType {
        self.step_type
    }

    /// The concept line this step was derived from.
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn connections(&self) -> &[String] {
        &self.connections
    }

    /// First outgoing reference, if any.
    pub fn next(&self) -> Option<&str> {
        self.connections.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_type_serialises_lowercase() {
        let json = serde_json::to_string(&StepType::Decision).unwrap();
        assert_eq!(json, "\"decision\"");
        let back: StepType = serde_json::from_str("\"terminal\"").unwrap();
        assert_eq!(back, StepType::Terminal);
    }

    #[test]
    fn step_deserialises_without_connections() {
        let step: Step = serde_json::from_str(
            r#"{ "name": "step_1", "step_type": "process", "instruction": "load" }"#,
        )
        .unwrap();
        assert_eq!(step.name(), "step_1");
        assert!(step.connections().is_empty());
        assert_eq!(step.next(), None);
    }

    #[test]
    fn next_is_first_connection() {
        let step = Step::new(
            "step_1",
            StepType::Decision,
            "ok?",
            vec!["step_2".into(), "step_3".into()],
        );
        assert_eq!(step.next(), Some("step_2"));
        assert_eq!(step.step_type().to_string(), "decision");
    }
}
