use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::store::FrequencyStore;

/// Common English function words, dropped before counting.
const BUILTIN_STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "i", "if", "in", "is", "it",
    "of", "on", "or", "that", "the", "this", "to", "was", "with",
];

/// A set of lower-cased words the tokenizer discards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stopwords {
    words: BTreeSet<String>,
}

impl Stopwords {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        Self::from_words(BUILTIN_STOPWORDS.iter().copied())
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stopwords = Self::none();
        stopwords.extend(words);
        stopwords
    }

    /// The `n` most frequent words of a trained store.
    ///
    /// Words that show up everywhere carry little signal, so an existing
    /// store's top words make a corpus-specific noise filter.
    pub fn from_top_words(store: &FrequencyStore, n: usize) -> Self {
        Self::from_words(store.top_words(n).into_iter().map(|(word, _)| word))
    }

    /// Read a stopword list: one word per line, blank lines and `#` comments skipped.
    pub fn load(path: &Path) -> Result<Self, std::io::Error> {
        let raw = fs::read_to_string(path)?;
        let words = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));

        Ok(Self::from_words(words))
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if !word.is_empty() {
                self.words.insert(word);
            }
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}
