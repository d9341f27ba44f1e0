use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::identifiers::CategoryName;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Text must be valid UTF-8")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("Category label must not be empty")]
    EmptyLabel,
    #[error("Category label is reserved: {0}")]
    ReservedLabel(String),
}

/// A training document: a body of text and the category it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledDocument {
    pub label: CategoryName,
    pub body: String,
}

impl LabeledDocument {
    /// Ingest a raw label and raw bytes into a LabeledDocument.
    ///
    /// This is the ONLY way to construct a LabeledDocument from untrusted input.
    /// It validates the label and the UTF-8 encoding of the body.
    pub fn ingest(label: &str, raw_body: &[u8]) -> Result<Self, InputError> {
        let label = CategoryName::new(label)?;
        let body = std::str::from_utf8(raw_body)?.to_string();

        Ok(LabeledDocument { label, body })
    }

    pub fn new(label: CategoryName, body: impl Into<String>) -> Self {
        LabeledDocument {
            label,
            body: body.into(),
        }
    }
}
