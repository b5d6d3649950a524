//! Lexer
//!
//!     This module turns a script into the list of lines the graph builder consumes.
//!
//! The Lexing Pipeline
//!
//!     The pipeline consists of:
//!         1. Core tokenization using logos. See [tokens](tokens).
//!            Each whitespace character is its own token, so indentation is a token count.
//!
//!         2. Line Grouping. See [line_grouping](line_grouping).
//!            Tokens are split on newlines into [SourceLine]s. Blank lines disappear here.
//!
//!         3. Baseline normalization. The first line's indentation becomes depth zero.
//!
//!     Classification (see [line_classification](line_classification)) is not part of
//!     [lex]: whether a deeper line is a branch depends on whether a condition is still
//!     open, and only the graph builder knows that. The loader interleaves the two.
//!
//! Indentation Handling
//!
//!     Unlike a block-structured format there are no indent/dedent tokens. Depth is a plain
//!     character count: spaces, tabs and full-width spaces all weigh one. Scripts are usually
//!     typed by hand in whatever editor is at hand, and comparing depths only needs "deeper
//!     than" and "back to", never a level number.

pub mod line_classification;
pub mod line_grouping;
pub mod tokens;

pub use line_classification::{classify_line, ClassifiedLine, ClassifyContext, Keywords, LineKind};
pub use line_grouping::SourceLine;
pub use tokens::{tokenize, Token};

/// Tokenize, group and normalize a script into its non-blank lines.
pub fn lex(source: &str) -> Vec<SourceLine> {
    let tokens = tokenize(source);
    let lines = line_grouping::group_lines(&tokens, source);
    line_grouping::normalize_baseline(lines)
}
