//! Line Grouping
//!
//!     Groups the flat token stream into one [SourceLine] per non-blank source line.
//!
//!     For every line we keep its 1-based line number (for error reporting), the number of
//!     leading whitespace tokens (its indentation) and the content text. The content is sliced
//!     straight out of the source from the first word to the last one, so inner spacing and
//!     symbols such as `&` survive untouched while trailing whitespace is dropped.
//!
//!     Blank lines are discarded here and never reach classification.

use super::tokens::Token;
use logos::Span;

/// A non-blank line of the script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based line number in the original source
    pub number: usize,
    /// Indentation in whitespace characters, relative to the script's baseline
    pub depth: usize,
    /// Line content without leading or trailing whitespace
    pub text: String,
}

#[derive(Default)]
struct PendingLine {
    indent: usize,
    content: Option<(usize, usize)>,
}

impl PendingLine {
    fn push(&mut self, token: Token, span: &Span) {
        match token {
            Token::Whitespace if self.content.is_none() => self.indent += 1,
            Token::Word => {
                let start = self.content.map_or(span.start, |(start, _)| start);
                self.content = Some((start, span.end));
            }
            _ => {}
        }
    }
}

/// Group tokens into lines, dropping blank ones.
///
/// Depths are still absolute here; see [normalize_baseline].
pub fn group_lines(tokens: &[(Token, Span)], source: &str) -> Vec<SourceLine> {
    let mut lines = Vec::new();
    let mut pending = PendingLine::default();
    let mut number = 1;

    for (token, span) in tokens {
        if *token == Token::Newline {
            flush(&mut lines, std::mem::take(&mut pending), number, source);
            number += 1;
        } else {
            pending.push(*token, span);
        }
    }
    flush(&mut lines, pending, number, source);

    lines
}

fn flush(lines: &mut Vec<SourceLine>, pending: PendingLine, number: usize, source: &str) {
    if let Some((start, end)) = pending.content {
        lines.push(SourceLine {
            number,
            depth: pending.indent,
            text: source[start..end].to_string(),
        });
    }
}

/// Make the first line's indentation the zero baseline.
///
/// Scripts pasted from elsewhere are often indented as a whole; only relative indentation
/// matters. Lines shallower than the baseline are treated as baseline lines.
pub fn normalize_baseline(mut lines: Vec<SourceLine>) -> Vec<SourceLine> {
    let baseline = match lines.first() {
        Some(first) => first.depth,
        None => return lines,
    };
    for line in &mut lines {
        line.depth = line.depth.saturating_sub(baseline);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::lexing::tokens::tokenize;

    fn lines(source: &str) -> Vec<SourceLine> {
        normalize_baseline(group_lines(&tokenize(source), source))
    }

    fn line(number: usize, depth: usize, text: &str) -> SourceLine {
        SourceLine {
            number,
            depth,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_blank_lines_are_dropped_but_numbering_is_kept() {
        assert_eq!(
            lines("\na\n\n   \nb\n"),
            vec![line(2, 0, "a"), line(5, 0, "b")]
        );
    }

    #[test]
    fn test_inner_spacing_is_preserved_and_trailing_trimmed() {
        assert_eq!(
            lines("mix  &  stir   \t"),
            vec![line(1, 0, "mix  &  stir")]
        );
    }

    #[test]
    fn test_baseline_is_first_content_line() {
        assert_eq!(
            lines("    a\n     b\n  c"),
            vec![line(1, 0, "a"), line(2, 1, "b"), line(3, 0, "c")]
        );
    }

    #[test]
    fn test_mixed_whitespace_counts_characters() {
        assert_eq!(
            lines("a\n\u{3000} \tb"),
            vec![line(1, 0, "a"), line(2, 3, "b")]
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(lines("a\r\nb\r\n"), vec![line(1, 0, "a"), line(2, 0, "b")]);
    }

    #[test]
    fn test_empty_source() {
        assert!(lines("").is_empty());
        assert!(lines("\n \n\t\n").is_empty());
    }
}
