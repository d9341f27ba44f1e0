pub mod corpus;

use tracing::{debug, info};

use crate::document::{InputError, LabeledDocument};
use crate::store::FrequencyStore;
use crate::tokenize::{Tokenize, WordTokenizer};
use crate::types::identifiers::CategoryName;
pub use corpus::{load_corpus, parse_corpus, CorpusError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrainingSummary {
    pub documents: usize,
    pub words: usize,
}

/// Feeds labeled documents into a store.
///
/// Use the same tokenizer as the classifier that will read the store,
/// otherwise stopwords counted here are never looked up there.
pub struct Trainer<'s, T = WordTokenizer> {
    store: &'s mut FrequencyStore,
    tokenizer: T,
}

impl<'s, T: Tokenize> Trainer<'s, T> {
    pub fn new(store: &'s mut FrequencyStore, tokenizer: T) -> Self {
        Self { store, tokenizer }
    }

    /// Count one document. Returns the number of distinct words counted.
    pub fn train(&mut self, document: &LabeledDocument) -> usize {
        let words = self.tokenizer.tokenize(&document.body);

        for word in &words {
            self.store.increment_word(word, &document.label);
        }
        self.store.increment_category(&document.label);

        debug!(category = %document.label, words = words.len(), "document trained");
        words.len()
    }

    /// Validate a raw label, then count the text under it.
    pub fn train_text(&mut self, label: &str, text: &str) -> Result<usize, InputError> {
        let document = LabeledDocument::new(CategoryName::new(label)?, text);
        Ok(self.train(&document))
    }

    pub fn train_all<'d, I>(&mut self, documents: I) -> TrainingSummary
    where
        I: IntoIterator<Item = &'d LabeledDocument>,
    {
        let mut summary = TrainingSummary::default();
        for document in documents {
            summary.words += self.train(document);
            summary.documents += 1;
        }

        info!(
            documents = summary.documents,
            words = summary.words,
            categories = self.store.category_count(),
            "training pass complete"
        );
        summary
    }

    pub fn store(&self) -> &FrequencyStore {
        &*self.store
    }
}
