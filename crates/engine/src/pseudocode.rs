//! Pseudocode rendering — a pure text transform over a step sequence.
//!
//! Grammar, one block per step followed by an empty line:
//!
//! ```text
//! process step_1:
//!     execute: <instruction>
//!     next: step_2
//!
//! decision step_2:
//!     condition: <instruction>
//!     if true: goto step_3
//!
//! terminal step_3:
//!     end: <instruction>
//! ```
//!
//! Decision steps never get a `next:` line. References are written as-is,
//! without validation.

use steps::{Step, StepType};

use crate::Workflow;

const INDENT: &str = "    ";

/// Render `workflow` as pseudocode. An empty workflow renders as `""`.
pub fn generate_pseudocode(workflow: &Workflow) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(workflow.len() * 4);
    for step in workflow {
        render_step(step, &mut lines);
        lines.push(String::new());
    }
    lines.join("\n")
}

fn render_step(step: &Step, lines: &mut Vec<String>) {
    let name = step.name();
    let instruction = step.instruction();

    match step.step_type() {
        StepType::Process => {
            lines.push(format!("process {name}:"));
            lines.push(format!("{INDENT}execute: {instruction}"));
        }
        StepType::Decision => {
            lines.push(format!("decision {name}:"));
            lines.push(format!("{INDENT}condition: {instruction}"));
            for target in step.connections() {
                lines.push(format!("{INDENT}if true: goto {target}"));
            }
        }
        StepType::Terminal => {
            lines.push(format!("terminal {name}:"));
            lines.push(format!("{INDENT}end: {instruction}"));
        }
    }

    if step.step_type() != StepType::Decision {
        if let Some(next) = step.next() {
            lines.push(format!("{INDENT}next: {next}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate_workflow;
    use proptest::prelude::*;

    #[test]
    fn empty_workflow_renders_empty_string() {
        assert_eq!(generate_pseudocode(&Workflow::default()), "");
    }

    #[test]
    fn renders_each_step_kind() {
        let wf = generate_workflow("load data\nis it valid?\nfinish");
        let expected = "\
process step_1:
    execute: load data
    next: step_2

decision step_2:
    condition: is it valid?
    if true: goto step_3

terminal step_3:
    end: finish
";
        assert_eq!(generate_pseudocode(&wf), expected);
    }

    #[test]
    fn decision_lists_every_connection_and_no_next() {
        let wf = Workflow::new(vec![Step::new(
            "step_1",
            StepType::Decision,
            "retry?",
            vec!["step_2".into(), "step_1".into()],
        )]);
        let out = generate_pseudocode(&wf);
        assert_eq!(
            out,
            "decision step_1:\n    condition: retry?\n    if true: goto step_2\n    if true: goto step_1\n"
        );
        assert!(!out.contains("next:"));
    }

    #[test]
    fn terminal_with_connection_gets_next_line() {
        let wf = Workflow::new(vec![Step::new(
            "step_1",
            StepType::Terminal,
            "end here",
            vec!["step_9".into()],
        )]);
        assert_eq!(
            generate_pseudocode(&wf),
            "terminal step_1:\n    end: end here\n    next: step_9\n"
        );
    }

    #[test]
    fn instruction_keeps_indentation() {
        let wf = generate_workflow("    Output results");
        assert_eq!(
            generate_pseudocode(&wf),
            "process step_1:\n    execute:     Output results\n"
        );
    }

    proptest! {
        #[test]
        fn rendering_is_deterministic(prompt in "[ a-zA-Z?\\n]{0,120}") {
            let wf = generate_workflow(&prompt);
            let again = wf.clone();
            prop_assert_eq!(generate_pseudocode(&wf), generate_pseudocode(&again));
        }

        #[test]
        fn one_header_per_step(prompt in "[ a-zA-Z?\\n]{0,120}") {
            let wf = generate_workflow(&prompt);
            let out = generate_pseudocode(&wf);
            let headers = out
                .lines()
                .filter(|l| !l.starts_with(' ') && l.ends_with(':'))
                .count();
            prop_assert_eq!(headers, wf.len());
        }
    }
}
