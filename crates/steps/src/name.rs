//! Step naming: `step_<ordinal>` with 1-based ordinals.

const PREFIX: &str = "step_";

/// Format the name of the step at `ordinal` (1-based).
pub fn step_name(ordinal: usize) -> String {
    format!("{PREFIX}{ordinal}")
}

/// Parse the ordinal out of a step reference.
///
/// Accepts exactly `step_` followed by one or more ASCII digits. Anything
/// else (signs, whitespace, extra segments) yields `None`.
pub fn parse_ordinal(reference: &str) -> Option<usize> {
    let digits = reference.strip_prefix(PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_one_based_names() {
        assert_eq!(step_name(1), "step_1");
        assert_eq!(step_name(42), "step_42");
    }

    #[test]
    fn parses_well_formed_references() {
        assert_eq!(parse_ordinal("step_1"), Some(1));
        assert_eq!(parse_ordinal("step_007"), Some(7));
        assert_eq!(parse_ordinal("step_0"), Some(0));
    }

    #[test]
    fn rejects_malformed_references() {
        for bad in ["step_", "step_-1", "step_+1", "step_1_2", "Step_1", " step_1", "step_1 ", "node_1", ""] {
            assert_eq!(parse_ordinal(bad), None, "{bad:?} should not parse");
        }
    }

    #[test]
    fn rejects_overflowing_ordinals() {
        assert_eq!(parse_ordinal("step_99999999999999999999999999"), None);
    }
}
