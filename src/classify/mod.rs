pub mod decision;
pub mod likelihood;

use tracing::debug;

use crate::config::{ClassifierConfig, ConfigError};
use crate::document::InputError;
use crate::store::{FrequencyStore, StoreError};
use crate::tokenize::{Tokenize, WordTokenizer};
use crate::types::classification::{CategoryScore, Classification, ClassifyError, Label};
pub use decision::{decide, Decision, DecisionRule};
pub use likelihood::{ProbabilityModel, Smoothing, WordLikelihood};

/// Naive Bayes classifier over an explicitly passed store.
///
/// Holds no counts of its own: every call is a pure function of the store
/// and the text.
pub struct Classifier<M, T> {
	model: M,
	tokenizer: T,
	rule: DecisionRule,
}

impl Default for Classifier<ProbabilityModel, WordTokenizer> {
	fn default() -> Self {
		Self {
			model: ProbabilityModel::default(),
			tokenizer: WordTokenizer::default(),
			rule: ClassifierConfig::v0().decision,
		}
	}
}

impl Classifier<ProbabilityModel, WordTokenizer> {
	pub fn from_config(config: &ClassifierConfig) -> Result<Self, ConfigError> {
		config.validate()?;
		let stopwords = config.stopwords.build()?;

		Ok(Self {
			model: ProbabilityModel::new(config.assumed_probability, config.smoothing),
			tokenizer: WordTokenizer::new(stopwords),
			rule: config.decision,
		})
	}
}

impl<M, T> Classifier<M, T>
where
	M: WordLikelihood,
	T: Tokenize,
{
	pub fn new(model: M, tokenizer: T, rule: DecisionRule) -> Self {
		Self {
			model,
			tokenizer,
			rule,
		}
	}

	pub fn tokenizer(&self) -> &T {
		&self.tokenizer
	}

	pub fn model(&self) -> &M {
		&self.model
	}

	pub fn rule(&self) -> &DecisionRule {
		&self.rule
	}

	/// prior × Π P(word | category) for a single category.
	pub fn score(&self, store: &FrequencyStore, text: &str, category: &str) -> Result<f64, StoreError> {
		if store.category(category).is_none() {
			return Err(StoreError::UnknownCategory(category.to_string()));
		}

		let words = self.tokenizer.tokenize(text);
		let log_score = self.log_score(store, &words, category)?;
		Ok(log_score.exp())
	}

	/// Scores for every known category, sorted by category name.
	pub fn scores(&self, store: &FrequencyStore, text: &str) -> Result<Vec<CategoryScore>, StoreError> {
		let words = self.tokenizer.tokenize(text);
		self.score_words(store, &words)
	}

	pub fn classify(&self, store: &FrequencyStore, text: &str) -> Result<Classification, ClassifyError> {
		// 1. Tokenize once, shared by every category
		let words = self.tokenizer.tokenize(text);

		// 2. Scoring Phase
		let scores = self.score_words(store, &words)?;

		// 3. Decision Phase
		let Decision {
			label,
			best,
			log_ratio,
		} = decide(&scores, &self.rule);
		let best = best.map(|b| b.category.clone());

		debug!(
			label = %label,
			categories = scores.len(),
			words = words.len(),
			log_ratio = ?log_ratio,
			"text classified"
		);

		Ok(Classification {
			label,
			scores,
			best,
			log_ratio,
			words_considered: words.len(),
		})
	}

	/// Classify raw bytes, rejecting anything that is not UTF-8.
	pub fn classify_bytes(&self, store: &FrequencyStore, raw: &[u8]) -> Result<Classification, ClassifyError> {
		let text = std::str::from_utf8(raw).map_err(InputError::from)?;
		self.classify(store, text)
	}

	pub fn label(&self, store: &FrequencyStore, text: &str) -> Result<Label, ClassifyError> {
		Ok(self.classify(store, text)?.label)
	}

	fn score_words(&self, store: &FrequencyStore, words: &[String]) -> Result<Vec<CategoryScore>, StoreError> {
		// categories() is sorted, which makes tie-breaking deterministic
		store
			.categories()
			.into_iter()
			.map(|category| {
				let log_score = self.log_score(store, words, category.as_str())?;
				Ok(CategoryScore {
					category: category.clone(),
					log_score,
				})
			})
			.collect()
	}

	// Summed in log space so long texts do not underflow to 0
	fn log_score(&self, store: &FrequencyStore, words: &[String], category: &str) -> Result<f64, StoreError> {
		let mut log_score = self.model.category_probability(store, category).ln();

		for word in words {
			log_score += self.model.word_probability(store, word, category)?.ln();
		}

		Ok(log_score)
	}
}
