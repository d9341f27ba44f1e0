use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::store::frequency::{CategoryCounts, FrequencyStore};
use crate::store::persistence::PersistenceError;
use crate::types::identifiers::{CategoryName, SnapshotVersion};

/// Snapshot layout written by this crate.
pub const SNAPSHOT_FORMAT: &str = "1";

// Key point:
// Complete (every category, every word count, every total)
// Self-verifying (version is a hash of the counts)
// Word index is derived, not stored
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StoreSnapshot {
    pub format: String,
    pub version: SnapshotVersion,
    pub created_at: DateTime<Utc>, // informational only
    pub training_count: u64,
    pub categories: BTreeMap<CategoryName, CategoryCounts>,
}

impl StoreSnapshot {
    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Hash of the counts, independent of `created_at`.
/// Every field is length-prefixed so no two distinct stores share an input.
fn compute_version(
    format: &str,
    training_count: u64,
    categories: &BTreeMap<CategoryName, CategoryCounts>,
) -> SnapshotVersion {
    let mut content = Vec::new();

    let mut field = |value: &str| {
        content.extend_from_slice(format!("{}:{}\n", value.len(), value).as_bytes());
    };

    field(format);
    field(&training_count.to_string());
    for (category, counts) in categories {
        field(category.as_str());
        field(&counts.total().to_string());
        field(&counts.words().len().to_string());
        for (word, count) in counts.words() {
            field(word);
            field(&count.to_string());
        }
    }

    SnapshotVersion::from_content(&content)
}

impl FrequencyStore {
    /// Capture the full aggregate.
    pub fn dump(&self) -> StoreSnapshot {
        let categories = self.category_map().clone();
        let training_count = self.train_count(None);

        StoreSnapshot {
            format: SNAPSHOT_FORMAT.to_string(),
            version: compute_version(SNAPSHOT_FORMAT, training_count, &categories),
            created_at: Utc::now(),
            training_count,
            categories,
        }
    }

    /// Restore a store from a snapshot, verifying it first.
    ///
    /// A snapshot that fails verification is rejected whole; nothing is repaired.
    pub fn load(snapshot: StoreSnapshot) -> Result<Self, PersistenceError> {
        if snapshot.format != SNAPSHOT_FORMAT {
            return Err(PersistenceError::UnsupportedFormat(snapshot.format));
        }

        let category_totals = snapshot
            .categories
            .values()
            .try_fold(0u64, |acc, counts| acc.checked_add(counts.total()))
            .ok_or_else(|| PersistenceError::Inconsistent("category totals overflow".to_string()))?;
        if category_totals != snapshot.training_count {
            return Err(PersistenceError::Inconsistent(format!(
                "training count {} does not match category totals {}",
                snapshot.training_count, category_totals
            )));
        }

        // serde skips the cached occurrence totals, so rebuild every entry
        let mut categories = BTreeMap::new();
        for (name, counts) in snapshot.categories {
            let (total, words) = counts.into_parts();
            let counts = CategoryCounts::from_parts(total, words).ok_or_else(|| {
                PersistenceError::Inconsistent(format!("word counts overflow in category {name}"))
            })?;
            categories.insert(name, counts);
        }

        let actual = compute_version(&snapshot.format, snapshot.training_count, &categories);

        let store = FrequencyStore::from_categories(categories, snapshot.training_count).ok_or_else(|| {
            PersistenceError::Inconsistent("word totals across categories overflow".to_string())
        })?;

        if actual != snapshot.version {
            return Err(PersistenceError::VersionMismatch {
                expected: snapshot.version.as_str().to_string(),
                actual: actual.as_str().to_string(),
            });
        }

        Ok(store)
    }
}
