use std::sync::LazyLock;

use fancy_regex::Regex;
use tracing::{debug, trace, warn};

use crate::contractions::ContractionTable;
use crate::error::Result;
use crate::token::{Token, TokenKind};

static DEFAULT_SCANNER: LazyLock<Scanner> =
    LazyLock::new(|| Scanner::new().expect("built-in scan rules and contraction table are valid"));

/// Tokenizes `text` with the built-in rules and contraction table.
pub fn tokenize(text: &str) -> Vec<String> {
    DEFAULT_SCANNER.tokenize(text)
}

/// Like [`tokenize`], keeping each token's kind and source span.
pub fn scan(text: &str) -> Vec<Token> {
    DEFAULT_SCANNER.scan(text)
}

struct Rule {
    kind: TokenKind,
    pattern: Regex,
}

impl Rule {
    fn compile(kind: TokenKind) -> Result<Self> {
        // The haystack is always sliced at the cursor, so `^` anchors there.
        let pattern = Regex::new(&format!("^(?:{})", kind.pattern()))?;
        Ok(Self { kind, pattern })
    }

    /// Length in bytes of this rule's match at the start of `rest`, if any.
    fn match_len(&self, rest: &str) -> Option<usize> {
        match self.pattern.find(rest) {
            Ok(Some(m)) if m.end() > 0 => Some(m.end()),
            Ok(_) => None,
            Err(e) => {
                warn!(kind = ?self.kind, error = %e, "rule failed to run");
                None
            }
        }
    }
}

/// Ordered-rule scanner: at each position the first rule matching there wins.
pub struct Scanner {
    rules: Vec<Rule>,
    contractions: ContractionTable,
}

impl Scanner {
    pub fn new() -> Result<Self> {
        Self::with_contractions(ContractionTable::builtin()?)
    }

    pub fn with_contractions(contractions: ContractionTable) -> Result<Self> {
        let rules = TokenKind::PRIORITY
            .iter()
            .map(|&kind| Rule::compile(kind))
            .collect::<Result<Vec<_>>>()?;
        debug!(rules = rules.len(), contractions = contractions.len(), "scanner ready");
        Ok(Self { rules, contractions })
    }

    pub fn contractions(&self) -> &ContractionTable {
        &self.contractions
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.scan(text).into_iter().map(|tk| tk.text).collect()
    }

    pub fn scan(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut pos = 0;

        while let Some(ch) = text[pos..].chars().next() {
            if ch.is_whitespace() {
                pos += ch.len_utf8();
                continue;
            }

            let Some((kind, len)) = self.match_at(&text[pos..]) else {
                trace!(pos, ch = %ch, "no rule matched, skipping");
                pos += ch.len_utf8();
                continue;
            };

            let end = pos + len;
            let value = &text[pos..end];
            trace!(pos, end, ?kind, value, "matched");

            if kind == TokenKind::Contraction {
                for part in self.contractions.expand(value) {
                    tokens.push(Token::new(kind, part, pos, end));
                }
            } else {
                tokens.push(Token::new(kind, value, pos, end));
            }
            pos = end;
        }

        tokens
    }

    fn match_at(&self, rest: &str) -> Option<(TokenKind, usize)> {
        self.rules
            .iter()
            .find_map(|rule| rule.match_len(rest).map(|len| (rule.kind, len)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_whitespace_only() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \t\n  \r\n").is_empty());
    }

    #[test]
    fn test_abbreviation_kept_whole() {
        assert_eq!(tokenize("U.S.A."), vec!["U.S.A."]);
        assert_eq!(tokenize("e.g. this"), vec!["e.g.", "this"]);
    }

    #[test]
    fn test_hyphenated_kept_whole() {
        assert_eq!(tokenize("ice-cream"), vec!["ice-cream"]);
        assert_eq!(tokenize("state-of-the-art"), vec!["state-of-the-art"]);
    }

    #[test]
    fn test_contractions() {
        assert_eq!(tokenize("isn't"), vec!["is", "not"]);
        assert_eq!(tokenize("It's"), vec!["it", "is"]);
        assert_eq!(tokenize("John's"), vec!["John", "'s"]);
        assert_eq!(tokenize("didn't"), vec!["did", "not"]);
        assert_eq!(tokenize("they'll"), vec!["they'll"]);
    }

    #[test]
    fn test_word_then_symbol() {
        assert_eq!(tokenize("Wow!"), vec!["Wow", "!"]);
        assert_eq!(tokenize("a,b"), vec!["a", ",", "b"]);
    }

    #[test]
    fn test_priority_beats_length() {
        // "a." is an abbreviation even though a word could start here too.
        let tokens = scan("a.b");
        assert_eq!(tokens[0].kind, TokenKind::Abbreviation);
        assert_eq!(tokens[0].text, "a.");
        assert_eq!(tokens[1].text, "b");
    }

    #[test]
    fn test_lab_sentence() {
        let text = "It's a sunny day in the U.S.A. I love ice-cream! He isn't going.";
        assert_eq!(
            tokenize(text),
            vec![
                "it", "is", "a", "sunny", "day", "in", "the", "U.S.A.", "I", "love",
                "ice-cream", "!", "He", "is", "not", "going", "."
            ]
        );
    }

    #[test]
    fn test_scan_kinds_and_spans() {
        let text = "He isn't here-now.";
        let tokens = scan(text);
        let kinds: Vec<TokenKind> = tokens.iter().map(|tk| tk.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Word,
                TokenKind::Contraction,
                TokenKind::Contraction,
                TokenKind::Hyphenated,
                TokenKind::Symbol,
            ]
        );
        assert_eq!((tokens[1].start, tokens[1].end), (3, 8));
        assert_eq!((tokens[2].start, tokens[2].end), (3, 8));
        assert_eq!(&text[tokens[3].start..tokens[3].end], "here-now");
    }

    #[test]
    fn test_non_ascii_input() {
        assert_eq!(tokenize("café — déjà vu"), vec!["café", "—", "déjà", "vu"]);
    }

    #[test]
    fn test_custom_contractions() {
        let mut table = ContractionTable::builtin().unwrap();
        table.extend(std::collections::HashMap::from([(
            "ain't".to_string(),
            vec!["am".to_string(), "not".to_string()],
        )]));
        let scanner = Scanner::with_contractions(table).unwrap();
        assert_eq!(scanner.tokenize("I ain't"), vec!["I", "am", "not"]);
    }

    proptest! {
        #[test]
        fn prop_whitespace_yields_nothing(s in "[ \t\r\n]*") {
            prop_assert!(tokenize(&s).is_empty());
        }

        #[test]
        fn prop_tokenize_is_deterministic(s in "\\PC{0,64}") {
            prop_assert_eq!(tokenize(&s), tokenize(&s));
        }

        #[test]
        fn prop_spans_are_monotonic(s in "\\PC{0,64}") {
            let tokens = scan(&s);
            let mut last = 0;
            for tk in &tokens {
                prop_assert!(tk.start >= last);
                prop_assert!(tk.start < tk.end && tk.end <= s.len());
                last = tk.start;
            }
        }
    }
}
