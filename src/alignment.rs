//! Co-occurrence word translation probabilities over a parallel corpus.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data;
use crate::error::Result;

type Counts = HashMap<String, u32>;

#[derive(Debug, Clone, Default)]
pub struct AlignmentTable {
    source_vocab: Vec<String>,
    target_vocab: Vec<String>,
    /// Number of sentence pairs whose source side contains the word.
    source_counts: Counts,
    /// Number of sentence pairs whose target side contains the word.
    target_counts: Counts,
    /// source word -> target word -> co-occurring token pairs.
    cooccurrences: HashMap<String, Counts>,
}

fn words(sentence: &str) -> Vec<String> {
    sentence.to_lowercase().split_whitespace().map(str::to_string).collect()
}

fn ratio(numerator: u32, denominator: Option<&u32>) -> f64 {
    match denominator {
        Some(&d) if d > 0 && numerator > 0 => numerator as f64 / d as f64,
        _ => 0.0,
    }
}

impl AlignmentTable {
    /// Table over the built-in English/Malayalam demonstration corpus.
    pub fn builtin() -> Result<Self> {
        Ok(Self::from_pairs(&data::load_alignment_corpus()?))
    }

    pub fn from_pairs<S: AsRef<str>>(pairs: &[(S, S)]) -> Self {
        let mut source_seen = BTreeSet::new();
        let mut target_seen = BTreeSet::new();
        let mut table = Self::default();

        for (source, target) in pairs {
            let source_words = words(source.as_ref());
            let target_words = words(target.as_ref());

            for e in source_words.iter().collect::<BTreeSet<_>>() {
                *table.source_counts.entry(e.clone()).or_default() += 1;
            }
            for f in target_words.iter().collect::<BTreeSet<_>>() {
                *table.target_counts.entry(f.clone()).or_default() += 1;
            }

            for e in &source_words {
                let row = table.cooccurrences.entry(e.clone()).or_default();
                for f in &target_words {
                    *row.entry(f.clone()).or_default() += 1;
                }
            }

            source_seen.extend(source_words);
            target_seen.extend(target_words);
        }

        table.source_vocab = source_seen.into_iter().collect();
        table.target_vocab = target_seen.into_iter().collect();
        debug!(
            pairs = pairs.len(),
            source_vocab = table.source_vocab.len(),
            target_vocab = table.target_vocab.len(),
            "alignment table built"
        );
        table
    }

    pub fn source_vocab(&self) -> &[String] {
        &self.source_vocab
    }

    pub fn target_vocab(&self) -> &[String] {
        &self.target_vocab
    }

    pub fn cooccurrence(&self, source: &str, target: &str) -> u32 {
        self.cooccurrences
            .get(source)
            .and_then(|row| row.get(target))
            .copied()
            .unwrap_or(0)
    }

    /// P(target | source) = cooc(source, target) / count(source).
    pub fn target_given_source(&self, target: &str, source: &str) -> f64 {
        ratio(
            self.cooccurrence(source, target),
            self.source_counts.get(source),
        )
    }

    /// P(source | target) = cooc(source, target) / count(target).
    pub fn source_given_target(&self, source: &str, target: &str) -> f64 {
        ratio(
            self.cooccurrence(source, target),
            self.target_counts.get(target),
        )
    }

    /// Rows are source words, columns target words.
    pub fn target_given_source_matrix(&self) -> ProbabilityMatrix {
        ProbabilityMatrix::build(&self.source_vocab, &self.target_vocab, |e, f| {
            self.target_given_source(f, e)
        })
    }

    /// Rows are target words, columns source words.
    pub fn source_given_target_matrix(&self) -> ProbabilityMatrix {
        ProbabilityMatrix::build(&self.target_vocab, &self.source_vocab, |f, e| {
            self.source_given_target(e, f)
        })
    }
}

/// Dense conditional probability table: `values[r][c]` = P(column | row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityMatrix {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl ProbabilityMatrix {
    fn build(rows: &[String], columns: &[String], prob: impl Fn(&str, &str) -> f64) -> Self {
        let values = rows
            .iter()
            .map(|r| columns.iter().map(|c| prob(r, c)).collect())
            .collect();
        Self {
            rows: rows.to_vec(),
            columns: columns.to_vec(),
            values,
        }
    }

    pub fn get(&self, row: &str, column: &str) -> Option<f64> {
        let r = self.rows.iter().position(|x| x == row)?;
        let c = self.columns.iter().position(|x| x == column)?;
        Some(self.values[r][c])
    }
}

impl fmt::Display for ProbabilityMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = self.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let widths: Vec<usize> = self
            .columns
            .iter()
            .map(|c| c.chars().count().max(6))
            .collect();

        write!(f, "{:label_width$}", "")?;
        for (col, width) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>width$}", col)?;
        }
        writeln!(f)?;

        for (row, values) in self.rows.iter().zip(&self.values) {
            write!(f, "{:label_width$}", row)?;
            for (value, width) in values.iter().zip(&widths) {
                write!(f, "  {:>width$.4}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
