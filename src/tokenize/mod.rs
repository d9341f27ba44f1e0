pub mod stopwords;

use std::collections::HashSet;

pub use stopwords::Stopwords;

/// Characters removed from text before splitting.
const STRIPPED_PUNCTUATION: &[char] = &['.', ',', '!', '?', '"', ':', ';', '-', '(', ')'];

pub trait Tokenize {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Splits text into distinct, normalized candidate words.
///
/// Normalization rules:
/// - Punctuation `. , ! ? " : ; - ( )` and numeric characters (any script) removed
/// - Split on whitespace
/// - Lowercase
/// - Empty, repeated and stopword tokens dropped
///
/// Output keeps first-occurrence order.
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    stopwords: Stopwords,
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self {
            stopwords: Stopwords::builtin(),
        }
    }
}

impl WordTokenizer {
    pub fn new(stopwords: Stopwords) -> Self {
        Self { stopwords }
    }

    pub fn stopwords(&self) -> &Stopwords {
        &self.stopwords
    }
}

impl Tokenize for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let stripped: String = text
            .chars()
            .filter(|c| !STRIPPED_PUNCTUATION.contains(c) && !c.is_numeric())
            .collect();

        let mut seen = HashSet::new();
        let mut words = Vec::new();

        for token in stripped.split_whitespace() {
            let word = token.to_lowercase();
            if word.is_empty() || self.stopwords.contains(&word) {
                continue;
            }
            if seen.insert(word.clone()) {
                words.push(word);
            }
        }

        words
    }
}
