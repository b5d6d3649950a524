//! Line Classification
//!
//! Tags each source line as a condition, a branch outcome, a nested step or a plain step.
//!
//! Classification follows this specific order (important for correctness):
//! 1. Condition lines (condition keyword, a space, then the condition text). Depth is ignored.
//! 2. Branch lines: anything indented deeper than the currently open condition
//! 3. Stray outcomes: an outcome keyword with no open condition is an error
//! 4. Nested steps: indented deeper than the baseline
//! 5. Default to step
//!
//! The classifier itself is stateless. Whether a condition is open is owned by the graph
//! builder, which hands it over as a [ClassifyContext].

use super::line_grouping::SourceLine;
use crate::flow::error::{ConvertError, MalformedReason};

/// The author-facing vocabulary of a script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keywords {
    /// Opens a condition when followed by a space, e.g. `if`
    pub condition: String,
    /// Outcome tokens that are never valid outside a condition.
    ///
    /// Under an open condition any leading token is accepted as an outcome label; this list
    /// only decides which top-level lines are reported as stray branches.
    pub outcomes: Vec<String>,
}

impl Default for Keywords {
    fn default() -> Self {
        Keywords {
            condition: "if".to_string(),
            outcomes: vec!["yes".to_string(), "no".to_string()],
        }
    }
}

/// What a line means to the graph builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Condition { text: String },
    Branch { label: String, text: String },
    NestedStep { text: String, depth: usize },
    Step { text: String },
}

/// A line together with its classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub number: usize,
    pub depth: usize,
    pub kind: LineKind,
}

/// Parse state the classifier needs to see
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifyContext {
    /// Depth of the open condition line, if any
    pub open_condition: Option<usize>,
}

/// Determine the kind of a single line.
pub fn classify_line(
    line: &SourceLine,
    context: &ClassifyContext,
    keywords: &Keywords,
) -> Result<ClassifiedLine, ConvertError> {
    let kind = classify_text(line, context, keywords)?;
    Ok(ClassifiedLine {
        number: line.number,
        depth: line.depth,
        kind,
    })
}

fn classify_text(
    line: &SourceLine,
    context: &ClassifyContext,
    keywords: &Keywords,
) -> Result<LineKind, ConvertError> {
    let text = line.text.as_str();

    if let Some(condition) = condition_text(text, &keywords.condition) {
        return Ok(LineKind::Condition {
            text: condition.to_string(),
        });
    }

    if let Some(condition_depth) = context.open_condition {
        if line.depth > condition_depth {
            let (label, rest) = split_outcome(text).ok_or_else(|| {
                ConvertError::malformed(line.number, text, MalformedReason::BranchWithoutText)
            })?;
            return Ok(LineKind::Branch {
                label: label.to_string(),
                text: rest.to_string(),
            });
        }
    }

    // An outcome anywhere but in branch position is an error, never a step.
    if is_stray_outcome(text, keywords) {
        let reason = match context.open_condition {
            Some(_) => MalformedReason::BranchNotIndented,
            None => MalformedReason::BranchWithoutCondition,
        };
        return Err(ConvertError::malformed(line.number, text, reason));
    }

    if line.depth > 0 {
        return Ok(LineKind::NestedStep {
            text: text.to_string(),
            depth: line.depth,
        });
    }

    Ok(LineKind::Step {
        text: text.to_string(),
    })
}

/// Returns the condition text if the line opens a condition.
///
/// The keyword must be followed by a literal space and at least one non-space character:
/// `if` alone or `ifdef x` are ordinary steps.
pub fn condition_text<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(keyword)?.strip_prefix(' ')?.trim();
    (!rest.is_empty()).then_some(rest)
}

/// Split `label remainder` on the first whitespace.
///
/// Returns `None` when there is no remainder.
pub fn split_outcome(text: &str) -> Option<(&str, &str)> {
    let (label, rest) = text.split_once(char::is_whitespace)?;
    let rest = rest.trim();
    (!rest.is_empty()).then_some((label, rest))
}

fn is_stray_outcome(text: &str, keywords: &Keywords) -> bool {
    split_outcome(text).is_some_and(|(label, _)| keywords.outcomes.iter().any(|o| o == label))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(depth: usize, text: &str) -> SourceLine {
        SourceLine {
            number: 7,
            depth,
            text: text.to_string(),
        }
    }

    fn classify(depth: usize, text: &str, open: Option<usize>) -> Result<LineKind, ConvertError> {
        let context = ClassifyContext {
            open_condition: open,
        };
        classify_line(&source(depth, text), &context, &Keywords::default()).map(|c| c.kind)
    }

    #[test]
    fn test_classify_condition() {
        assert_eq!(
            classify(0, "if 肉 & サラダが早く炒め終わる", None),
            Ok(LineKind::Condition {
                text: "肉 & サラダが早く炒め終わる".to_string()
            })
        );
    }

    #[test]
    fn test_condition_keyword_needs_space_and_text() {
        assert_eq!(
            classify(0, "if", None),
            Ok(LineKind::Step {
                text: "if".to_string()
            })
        );
        assert_eq!(
            classify(0, "ifdef x", None),
            Ok(LineKind::Step {
                text: "ifdef x".to_string()
            })
        );
        assert_eq!(
            classify(0, "If hot", None),
            Ok(LineKind::Step {
                text: "If hot".to_string()
            })
        );
    }

    #[test]
    fn test_condition_wins_over_branch_position() {
        assert_eq!(
            classify(2, "if again", Some(0)),
            Ok(LineKind::Condition {
                text: "again".to_string()
            })
        );
    }

    #[test]
    fn test_classify_branch_with_any_label() {
        assert_eq!(
            classify(1, "other 気合を入れる", Some(0)),
            Ok(LineKind::Branch {
                label: "other".to_string(),
                text: "気合を入れる".to_string()
            })
        );
    }

    #[test]
    fn test_branch_without_text_is_malformed() {
        let err = classify(1, "yes", Some(0)).unwrap_err();
        assert_eq!(
            err,
            ConvertError::malformed(7, "yes", MalformedReason::BranchWithoutText)
        );
    }

    #[test]
    fn test_line_at_condition_depth_is_not_a_branch() {
        assert_eq!(
            classify(0, "煮込む", Some(0)),
            Ok(LineKind::Step {
                text: "煮込む".to_string()
            })
        );
    }

    #[test]
    fn test_stray_outcome_is_malformed() {
        let err = classify(1, "yes stir", None).unwrap_err();
        assert_eq!(
            err,
            ConvertError::malformed(7, "yes stir", MalformedReason::BranchWithoutCondition)
        );
        assert!(classify(0, "no salt", None).is_err());
    }

    #[test]
    fn test_outcome_at_condition_depth_is_malformed() {
        assert_eq!(
            classify(0, "yes x", Some(0)),
            Err(ConvertError::malformed(
                7,
                "yes x",
                MalformedReason::BranchNotIndented
            ))
        );
        assert_eq!(
            classify(1, "no y", Some(2)),
            Err(ConvertError::malformed(
                7,
                "no y",
                MalformedReason::BranchNotIndented
            ))
        );
    }

    #[test]
    fn test_classify_nested_step() {
        assert_eq!(
            classify(2, "にんじん", None),
            Ok(LineKind::NestedStep {
                text: "にんじん".to_string(),
                depth: 2
            })
        );
    }

    #[test]
    fn test_custom_keywords() {
        let keywords = Keywords {
            condition: "when".to_string(),
            outcomes: vec!["ok".to_string()],
        };
        let context = ClassifyContext::default();
        let kind = |text: &str| {
            classify_line(&source(0, text), &context, &keywords).map(|c| c.kind)
        };

        assert_eq!(
            kind("when done"),
            Ok(LineKind::Condition {
                text: "done".to_string()
            })
        );
        assert!(kind("ok go").is_err());
        assert_eq!(
            kind("yes go"),
            Ok(LineKind::Step {
                text: "yes go".to_string()
            })
        );
    }

    #[test]
    fn test_split_outcome() {
        assert_eq!(split_outcome("yes  a b"), Some(("yes", "a b")));
        assert_eq!(split_outcome("yes\u{3000}a"), Some(("yes", "a")));
        assert_eq!(split_outcome("yes"), None);
        assert_eq!(split_outcome("yes   "), None);
    }
}
