use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::borrow::Borrow;
use std::fmt;

use crate::document::InputError;

/// Label returned when no category is confident enough.
/// Reserved: it can never be used as a category name.
pub const UNKNOWN_LABEL: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a CategoryName from a raw label.
    /// Normalization rules:
    /// - Surrounding whitespace trimmed
    /// - Must not be empty
    /// - Must not be the reserved `unknown` label
    pub fn new(raw: impl AsRef<str>) -> Result<Self, InputError> {
        let trimmed = raw.as_ref().trim();

        if trimmed.is_empty() {
            return Err(InputError::EmptyLabel);
        }
        if trimmed == UNKNOWN_LABEL {
            return Err(InputError::ReservedLabel(trimmed.to_string()));
        }

        Ok(CategoryName(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CategoryName {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CategoryName::new(value)
    }
}

impl From<CategoryName> for String {
    fn from(name: CategoryName) -> Self {
        name.0
    }
}

// Lets BTreeMap<CategoryName, _> be queried with a plain &str.
impl Borrow<str> for CategoryName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content hash of a snapshot's counts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotVersion(String);

impl SnapshotVersion {
    pub fn from_content(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);

        let hash = hasher.finalize();
        let hex = hex::encode(hash);

        SnapshotVersion(format!("sha256:{hex}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SnapshotVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
