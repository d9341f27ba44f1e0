use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::document::{InputError, LabeledDocument};

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid record {index}: {source}")]
    Input {
        index: usize,
        #[source]
        source: InputError,
    },
}

/// One `{ "label": ..., "body": ... }` entry. `mood` is accepted for `label`.
#[derive(Debug, Deserialize)]
struct CorpusRecord {
    #[serde(alias = "mood")]
    label: String,
    body: String,
}

/// Parse a JSON array of labeled records.
pub fn parse_corpus(raw: &str) -> Result<Vec<LabeledDocument>, CorpusError> {
    let records: Vec<CorpusRecord> = serde_json::from_str(raw)?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            LabeledDocument::ingest(&record.label, record.body.as_bytes())
                .map_err(|source| CorpusError::Input { index, source })
        })
        .collect()
}

pub fn load_corpus(path: &Path) -> Result<Vec<LabeledDocument>, CorpusError> {
    let raw = fs::read_to_string(path)?;
    parse_corpus(&raw)
}
