//! Logos-based lexer for signature files

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use text_size::{TextRange, TextSize};

/// A token with its kind, text, and position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub range: TextRange,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, SyntaxKind>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: SyntaxKind::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let kind = match self.inner.next()? {
            Ok(kind) => kind,
            Err(()) => SyntaxKind::ERROR,
        };
        let span = self.inner.span();
        let range = TextRange::new(TextSize::new(span.start as u32), TextSize::new(span.end as u32));
        Some(Token {
            kind,
            text: self.inner.slice(),
            range,
        })
    }
}

/// Tokenize an entire string into a Vec, trivia included
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}
