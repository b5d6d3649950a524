//! Token definitions for flow scripts
//!
//! Flow scripts only care about three things at the token level: where lines break, how
//! much whitespace leads a line, and where the words are. Everything else (keywords,
//! outcome labels) is decided per line by the classifier, so the token set stays tiny.

use logos::Logos;

/// All tokens produced by the base tokenizer
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    #[token("\n")]
    Newline,

    // One token per whitespace character so indentation can be counted by tokens. Tabs and
    // full-width spaces count the same as a plain space.
    #[regex(r"[^\S\n]")]
    Whitespace,

    #[regex(r"\S+")]
    Word,
}

/// Tokenize a source string, keeping the byte span of every token
pub fn tokenize(source: &str) -> Vec<(Token, logos::Span)> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        if let Ok(token) = result {
            tokens.push((token, lexer.span()));
        }
    }

    tokens
}
