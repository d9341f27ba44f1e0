// Counters only. No probability logic lives here.
// Mutation goes through increment_word / increment_category;
// counts are never decremented.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::identifiers::CategoryName;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Category does not exist: {0}")]
    UnknownCategory(String),
}

/// Counts gathered for a single category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    /// Training documents assigned to this category.
    total: u64,
    words: BTreeMap<String, u64>,
    /// Sum of `words`, kept alongside so lookups stay O(log n).
    #[serde(skip)]
    occurrences: u64,
}

impl CategoryCounts {
    /// None when the word counts overflow u64.
    pub(crate) fn from_parts(total: u64, words: BTreeMap<String, u64>) -> Option<Self> {
        let occurrences = words.values().try_fold(0u64, |acc, &n| acc.checked_add(n))?;
        Some(Self {
            total,
            words,
            occurrences,
        })
    }

    pub(crate) fn into_parts(self) -> (u64, BTreeMap<String, u64>) {
        (self.total, self.words)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn words(&self) -> &BTreeMap<String, u64> {
        &self.words
    }

    pub fn occurrences(&self) -> u64 {
        self.occurrences
    }

    pub fn count(&self, word: &str) -> u64 {
        self.words.get(word).copied().unwrap_or(0)
    }
}

/// Secondary index entry: where a word has been seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordRecord {
    categories: BTreeMap<CategoryName, u64>,
    total: u64,
}

impl WordRecord {
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn categories(&self) -> &BTreeMap<CategoryName, u64> {
        &self.categories
    }

    /// Number of distinct categories the word appears in.
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    fn add(&mut self, category: &CategoryName, count: u64) -> Option<()> {
        let total = self.total.checked_add(count)?;
        let slot = self.categories.entry(category.clone()).or_insert(0);
        *slot = slot.checked_add(count)?;
        self.total = total;
        Some(())
    }
}

/// Word/category co-occurrence counters.
///
/// Single writer: mutation needs `&mut self`, so reads never observe a
/// half-applied training step within one process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyStore {
    categories: BTreeMap<CategoryName, CategoryCounts>,
    words: BTreeMap<String, WordRecord>,
    training_count: u64,
}

impl FrequencyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store (and its word index) from category counts.
    ///
    /// None when a word's total across categories overflows u64.
    pub(crate) fn from_categories(
        categories: BTreeMap<CategoryName, CategoryCounts>,
        training_count: u64,
    ) -> Option<Self> {
        let mut words: BTreeMap<String, WordRecord> = BTreeMap::new();
        for (category, counts) in &categories {
            for (word, count) in &counts.words {
                words.entry(word.clone()).or_default().add(category, *count)?;
            }
        }

        Some(Self {
            categories,
            words,
            training_count,
        })
    }

    pub(crate) fn category_map(&self) -> &BTreeMap<CategoryName, CategoryCounts> {
        &self.categories
    }

    /// Count one occurrence of `word` in `category`, creating the category if needed.
    pub fn increment_word(&mut self, word: &str, category: &CategoryName) {
        let counts = self.categories.entry(category.clone()).or_default();
        *counts.words.entry(word.to_string()).or_insert(0) += 1;
        counts.occurrences += 1;

        let record = self.words.entry(word.to_string()).or_default();
        *record.categories.entry(category.clone()).or_insert(0) += 1;
        record.total += 1;
    }

    /// Count one training document in `category`, creating the category if needed.
    pub fn increment_category(&mut self, category: &CategoryName) {
        let counts = self.categories.entry(category.clone()).or_default();
        counts.total += 1;
        self.training_count += 1;
    }

    /// Every category with at least one training signal, sorted by name.
    pub fn categories(&self) -> Vec<&CategoryName> {
        self.categories.keys().collect()
    }

    pub fn category(&self, category: &str) -> Option<&CategoryCounts> {
        self.categories.get(category)
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Training documents seen.
    ///
    /// `None` gives the global total. An unknown category gives 0.
    pub fn train_count(&self, category: Option<&str>) -> u64 {
        match category {
            None => self.training_count,
            Some(name) => self.categories.get(name).map_or(0, |c| c.total),
        }
    }

    /// Word occurrences in `category`, or occurrences of `word` in it (0 if absent).
    ///
    /// Fails when the category itself does not exist.
    pub fn words_in_category(&self, category: &str, word: Option<&str>) -> Result<u64, StoreError> {
        let counts = self.get_category(category)?;

        Ok(match word {
            Some(word) => counts.count(word),
            None => counts.occurrences,
        })
    }

    /// Distinct words recorded in `category`.
    pub fn distinct_words_in_category(&self, category: &str) -> Result<u64, StoreError> {
        let counts = self.get_category(category)?;
        Ok(counts.words.len() as u64)
    }

    /// Occurrences of `word` across all categories; 0 if never seen.
    pub fn total_word_count(&self, word: &str) -> u64 {
        self.words.get(word).map_or(0, |w| w.total)
    }

    pub fn word(&self, word: &str) -> Option<&WordRecord> {
        self.words.get(word)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.words.len()
    }

    /// The `n` most frequent words, count descending then word ascending.
    pub fn top_words(&self, n: usize) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self
            .words
            .iter()
            .map(|(word, record)| (word.as_str(), record.total))
            .collect();

        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }

    fn get_category(&self, category: &str) -> Result<&CategoryCounts, StoreError> {
        self.categories
            .get(category)
            .ok_or_else(|| StoreError::UnknownCategory(category.to_string()))
    }
}
