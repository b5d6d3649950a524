//! Errors raised while turning a script into a graph

use thiserror::Error;

/// Why a script could not be converted.
///
/// Conversion is all-or-nothing: the first error aborts it and no partial graph is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The script breaks the branch/condition rules, e.g. an outcome line with no open
    /// condition. `line` is 1-based and `text` is the offending line, trimmed.
    #[error("malformed script at line {line}: {reason}: `{text}`")]
    MalformedScript {
        line: usize,
        text: String,
        reason: MalformedReason,
    },
}

/// The specific rule a malformed line broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("branch outcome without an open condition")]
    BranchWithoutCondition,
    #[error("branch outcome without step text")]
    BranchWithoutText,
    #[error("branch outcome not indented under the open condition")]
    BranchNotIndented,
}

impl ConvertError {
    pub fn malformed(line: usize, text: impl Into<String>, reason: MalformedReason) -> Self {
        ConvertError::MalformedScript {
            line,
            text: text.into(),
            reason,
        }
    }

    /// 1-based line number of the offending line.
    pub fn line(&self) -> usize {
        match self {
            ConvertError::MalformedScript { line, .. } => *line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_line_and_text() {
        let err = ConvertError::malformed(3, "yes stir", MalformedReason::BranchWithoutCondition);
        assert_eq!(
            err.to_string(),
            "malformed script at line 3: branch outcome without an open condition: `yes stir`"
        );
        assert_eq!(err.line(), 3);
    }
}
