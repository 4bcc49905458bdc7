use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

pub type ContractionEntries = HashMap<String, Vec<String>>;
pub type SentencePairs = Vec<(String, String)>;

pub fn load_contractions() -> Result<ContractionEntries> {
    let data = include_str!("../data/contractions.json");
    Ok(serde_json::from_str(data)?)
}

pub fn load_alignment_corpus() -> Result<SentencePairs> {
    let data = include_str!("../data/alignment_corpus.json");
    Ok(serde_json::from_str(data)?)
}

pub fn read_contractions(path: &Path) -> Result<ContractionEntries> {
    Ok(serde_json::from_str(&read(path)?)?)
}

pub fn read_alignment_corpus(path: &Path) -> Result<SentencePairs> {
    Ok(serde_json::from_str(&read(path)?)?)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
