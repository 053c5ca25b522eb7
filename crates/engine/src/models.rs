//! The workflow graph: an ordered sequence of steps addressed by ordinal.
//!
//! Edges are the step names stored in each [`Step`]'s connections and are
//! resolved positionally (`step_k` lives at index `k - 1`), so a workflow is a
//! plain vector with no internal links and serialises as a JSON array.

use serde::{Deserialize, Serialize};
use steps::name::parse_ordinal;
use steps::Step;

use crate::EngineError;

/// An ordered sequence of steps. The first step is the only entry point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Workflow {
    steps: Vec<Step>,
}

impl Workflow {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Entry point of the traversal.
    pub fn first(&self) -> Option<&Step> {
        self.steps.first()
    }

    /// Resolve `reference` (held by the step named `from`) to its index and step.
    ///
    /// # Errors
    /// [`EngineError::MalformedReference`] if the reference is not of the form
    /// `step_<n>` or `n` is outside `1..=len`.
    pub fn resolve(&self, from: &str, reference: &str) -> Result<(usize, &Step), EngineError> {
        let malformed = |reason| EngineError::MalformedReference {
            step: from.to_owned(),
            reference: reference.to_owned(),
            reason,
        };

        let ordinal = parse_ordinal(reference).ok_or_else(|| malformed("not of the form step_<n>"))?;
        let index = ordinal
            .checked_sub(1)
            .ok_or_else(|| malformed("ordinals start at 1"))?;
        let step = self
            .steps
            .get(index)
            .ok_or_else(|| malformed("ordinal is past the end of the workflow"))?;
        Ok((index, step))
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

impl From<Vec<Step>> for Workflow {
    fn from(steps: Vec<Step>) -> Self {
        Self::new(steps)
    }
}

impl<'a> IntoIterator for &'a Workflow {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use steps::StepType;

    fn two_steps() -> Workflow {
        Workflow::new(vec![
            Step::new("step_1", StepType::Process, "a", vec!["step_2".into()]),
            Step::new("step_2", StepType::Terminal, "finish", vec![]),
        ])
    }

    #[test]
    fn resolves_in_range_reference() {
        let wf = two_steps();
        let (index, step) = wf.resolve("step_1", "step_2").expect("in range");
        assert_eq!(index, 1);
        assert_eq!(step.name(), "step_2");
    }

    #[test]
    fn rejects_zero_ordinal_instead_of_wrapping() {
        let wf = two_steps();
        assert!(matches!(
            wf.resolve("step_1", "step_0"),
            Err(EngineError::MalformedReference { reference, .. }) if reference == "step_0"
        ));
    }

    #[test]
    fn rejects_past_the_end_and_unparsable() {
        let wf = two_steps();
        assert!(wf.resolve("step_1", "step_3").is_err());
        assert!(wf.resolve("step_1", "finish").is_err());
    }

    #[test]
    fn serialises_as_plain_array() {
        let json = serde_json::to_value(two_steps()).unwrap();
        assert!(json.is_array());
        assert_eq!(json[1]["step_type"], "terminal");
        let back: Workflow = serde_json::from_value(json).unwrap();
        assert_eq!(back, two_steps());
    }
}
