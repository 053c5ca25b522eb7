//! Reference validation — run this on workflows that did not come from the
//! builder (deserialised from JSON, assembled by another producer).
//!
//! Rules enforced:
//! 1. The step at index `i` must be named `step_<i+1>`.
//! 2. Every connection must parse as `step_<n>` with `n` inside the workflow.
//!
//! Cycles are not rejected here; the evaluator bounds them at traversal time.
//! Returns the names of the steps reachable from the entry point by following
//! every connection.

use std::collections::{HashSet, VecDeque};

use steps::name::step_name;

use crate::{EngineError, Workflow};

/// Validate names and references and return the reachable step names in
/// breadth-first order from the entry step.
///
/// # Errors
/// - [`EngineError::MisnamedStep`] if a step's name does not match its position.
/// - [`EngineError::MalformedReference`] if a connection cannot be resolved.
pub fn validate_references(workflow: &Workflow) -> Result<Vec<String>, EngineError> {
    // -----------------------------------------------------------------------
    // 1. Names are dense and positional
    // -----------------------------------------------------------------------
    for (index, step) in workflow.iter().enumerate() {
        if step.name() != step_name(index + 1) {
            return Err(EngineError::MisnamedStep {
                index,
                name: step.name().to_owned(),
            });
        }
    }

    // -----------------------------------------------------------------------
    // 2. Every connection resolves
    // -----------------------------------------------------------------------
    let mut targets: Vec<Vec<usize>> = Vec::with_capacity(workflow.len());
    for step in workflow {
        let resolved = step
            .connections()
            .iter()
            .map(|reference| workflow.resolve(step.name(), reference).map(|(i, _)| i))
            .collect::<Result<Vec<_>, _>>()?;
        targets.push(resolved);
    }

    // -----------------------------------------------------------------------
    // 3. Reachability from the entry step (breadth-first)
    // -----------------------------------------------------------------------
    let mut reachable: Vec<String> = Vec::new();
    if workflow.is_empty() {
        return Ok(reachable);
    }

    let mut seen: HashSet<usize> = HashSet::from([0]);
    let mut queue: VecDeque<usize> = VecDeque::from([0]);

    while let Some(index) = queue.pop_front() {
        reachable.push(step_name(index + 1));
        for &next in &targets[index] {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }

    Ok(reachable)
}

// ============================================================
// Unit tests
// ============================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate_workflow;
    use steps::{Step, StepType};

    fn make_step(name: &str, connections: &[&str]) -> Step {
        Step::new(
            name,
            StepType::Process,
            "do something",
            connections.iter().map(|c| c.to_string()).collect(),
        )
    }

    #[test]
    fn built_workflow_is_valid_and_fully_reachable() {
        let wf = generate_workflow("a\nb?\nfinish");
        let reachable = validate_references(&wf).expect("should be valid");
        assert_eq!(reachable, vec!["step_1", "step_2", "step_3"]);
    }

    #[test]
    fn empty_workflow_is_valid() {
        assert!(validate_references(&Workflow::default()).unwrap().is_empty());
    }

    #[test]
    fn back_edge_is_allowed() {
        // 1 → 2 → 3 → 1
        let wf = Workflow::new(vec![
            make_step("step_1", &["step_2"]),
            make_step("step_2", &["step_3"]),
            make_step("step_3", &["step_1"]),
        ]);
        assert_eq!(validate_references(&wf).unwrap().len(), 3);
    }

    #[test]
    fn unreachable_steps_are_left_out() {
        let wf = Workflow::new(vec![make_step("step_1", &[]), make_step("step_2", &["step_1"])]);
        assert_eq!(validate_references(&wf).unwrap(), vec!["step_1"]);
    }

    #[test]
    fn misnamed_step_is_rejected() {
        let wf = Workflow::new(vec![make_step("step_1", &["step_2"]), make_step("step_7", &[])]);
        assert!(matches!(
            validate_references(&wf),
            Err(EngineError::MisnamedStep { index: 1, name }) if name == "step_7"
        ));
    }

    #[test]
    fn dangling_reference_is_rejected() {
        let wf = Workflow::new(vec![make_step("step_1", &["ghost"])]);
        assert!(matches!(
            validate_references(&wf),
            Err(EngineError::MalformedReference { reference, .. }) if reference == "ghost"
        ));
    }

    #[test]
    fn error_message_names_expected_step() {
        let wf = Workflow::new(vec![make_step("first", &[])]);
        let err = validate_references(&wf).unwrap_err();
        assert_eq!(err.to_string(), "step at index 0 is named 'first', expected 'step_1'");
    }
}
