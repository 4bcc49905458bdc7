use serde::{Deserialize, Serialize};

/// Kind of a scanned token. Declaration order is the scan priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Abbreviation,
    Hyphenated,
    Contraction,
    Word,
    Symbol,
}

impl TokenKind {
    pub const PRIORITY: [TokenKind; 5] = [
        TokenKind::Abbreviation,
        TokenKind::Hyphenated,
        TokenKind::Contraction,
        TokenKind::Word,
        TokenKind::Symbol,
    ];

    pub fn pattern(&self) -> &'static str {
        match self {
            TokenKind::Abbreviation => r"(?:[a-zA-Z]\.)+",
            TokenKind::Hyphenated => r"\w+(?:-\w+)+",
            TokenKind::Contraction => r"\w+(?:n't|'s|'re|'ll|'ve|'m|'d)",
            TokenKind::Word => r"\w+",
            TokenKind::Symbol => r"[^\w\s]",
        }
    }
}

/// A token with the byte span of the source text it came from.
///
/// Tokens produced by expanding one contraction share that contraction's span,
/// so `text` need not equal `source[start..end]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            start,
            end,
        }
    }

    pub fn is_expanded(&self, source: &str) -> bool {
        source.get(self.start..self.end) != Some(self.text.as_str())
    }
}
