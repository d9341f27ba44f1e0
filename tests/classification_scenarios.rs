use bayes_core::classify::{
    decide, Classifier, DecisionRule, ProbabilityModel, Smoothing, WordLikelihood,
};
use bayes_core::document::CategoryName;
use bayes_core::store::{FrequencyStore, StoreError};
use bayes_core::tokenize::WordTokenizer;
use bayes_core::training::Trainer;
use bayes_core::types::{CategoryScore, ClassifyError, Label};

fn name(s: &str) -> CategoryName {
    CategoryName::new(s).unwrap()
}

fn train(store: &mut FrequencyStore, docs: &[(&str, &str)]) {
    let mut trainer = Trainer::new(store, WordTokenizer::default());
    for (label, text) in docs {
        trainer.train_text(label, text).unwrap();
    }
}

fn spam_ham_store() -> FrequencyStore {
    let mut store = FrequencyStore::new();
    train(
        &mut store,
        &[("spam", "buy now cheap pills"), ("ham", "meeting notes attached")],
    );
    store
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn lexical_overlap_picks_spam() {
    let store = spam_ham_store();
    let classifier = Classifier::default();

    let result = classifier.classify(&store, "cheap pills now").unwrap();

    assert_eq!(result.label, Label::Category(name("spam")));
    assert_eq!(result.label.to_string(), "spam");
    assert_eq!(result.best, Some(name("spam")));
    assert_eq!(result.words_considered, 3);
    // (0.375 / 0.25)^3
    assert_close(result.log_ratio.unwrap(), 3.375f64.ln());
}

#[test]
fn no_overlap_is_unknown() {
    let store = spam_ham_store();
    let classifier = Classifier::default();

    let result = classifier.classify(&store, "completely unrelated xyz").unwrap();

    assert_eq!(result.label, Label::Unknown);
    assert_eq!(result.label.to_string(), "unknown");
    assert_close(result.log_ratio.unwrap(), 0.0);
}

#[test]
fn untrained_store_is_always_unknown() {
    let store = FrequencyStore::new();
    let classifier = Classifier::default();

    for text in ["cheap pills now", "", "anything at all"] {
        let result = classifier.classify(&store, text).unwrap();
        assert_eq!(result.label, Label::Unknown);
        assert!(result.scores.is_empty());
        assert_eq!(result.best, None);
    }
}

#[test]
fn word_only_store_has_zero_priors_and_is_unknown() {
    let mut store = FrequencyStore::new();
    store.increment_word("cheap", &name("spam"));
    store.increment_word("meeting", &name("ham"));
    let classifier = Classifier::default();

    let result = classifier.classify(&store, "cheap").unwrap();

    assert_eq!(result.scores.len(), 2);
    assert!(result.scores.iter().all(|s| s.is_zero() && s.score() == 0.0));
    assert_eq!(result.label, Label::Unknown);
}

#[test]
fn single_category_has_no_competitor() {
    let mut store = FrequencyStore::new();
    train(&mut store, &[("spam", "buy now")]);
    let classifier = Classifier::default();

    let result = classifier.classify(&store, "something else entirely").unwrap();

    assert_eq!(result.label, Label::Category(name("spam")));
    assert_eq!(result.log_ratio, Some(f64::INFINITY));
}

#[test]
fn exact_tie_prefers_first_category_by_name() {
    let mut store = FrequencyStore::new();
    train(
        &mut store,
        &[("zebra", "common words"), ("apple", "common words")],
    );
    let classifier = Classifier::default();

    let result = classifier.classify(&store, "common words").unwrap();

    assert_eq!(result.scores[0].log_score, result.scores[1].log_score);
    assert_eq!(result.best, Some(name("apple")));
    assert_eq!(result.label, Label::Unknown);
}

#[test]
fn scores_are_sorted_by_category_and_match_the_product() {
    let store = spam_ham_store();
    let classifier = Classifier::default();

    let scores = classifier.scores(&store, "cheap pills now").unwrap();

    let names: Vec<&str> = scores.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(names, vec!["ham", "spam"]);
    // prior 0.5, three words at 0.25 / 0.375
    assert_close(scores[0].score(), 0.5 * 0.25f64.powi(3));
    assert_close(scores[1].score(), 0.5 * 0.375f64.powi(3));
    assert_close(
        classifier.score(&store, "cheap pills now", "spam").unwrap(),
        0.0263671875,
    );
}

#[test]
fn scoring_an_unknown_category_fails() {
    let store = spam_ham_store();
    let classifier = Classifier::default();

    let err = classifier.score(&store, "", "eggs").unwrap_err();

    assert_eq!(err, StoreError::UnknownCategory("eggs".to_string()));
}

#[test]
fn weighted_likelihoods() {
    let store = spam_ham_store();
    let model = ProbabilityModel::default();

    assert_close(model.word_probability(&store, "cheap", "spam").unwrap(), 0.375);
    assert_close(model.word_probability(&store, "cheap", "ham").unwrap(), 0.25);
    assert_close(model.word_probability(&store, "never-seen", "ham").unwrap(), 0.5);
    assert_close(model.category_probability(&store, "spam"), 0.5);
    assert_close(model.category_probability(&store, "eggs"), 0.0);
    assert!(model.word_probability(&store, "cheap", "eggs").is_err());
}

#[test]
fn zero_weight_blend_is_raw_frequency_for_seen_words() {
    let store = spam_ham_store();
    let model = ProbabilityModel::new(0.5, Smoothing::Weighted { weight: 0.0 });

    assert_close(model.word_probability(&store, "cheap", "spam").unwrap(), 0.25);
    assert_close(model.word_probability(&store, "cheap", "ham").unwrap(), 0.0);
    assert_close(model.word_probability(&store, "never-seen", "ham").unwrap(), 0.5);
}

#[test]
fn raw_fallback_rewards_unseen_words() {
    // Unseen words get the assumed 0.5, which beats a seen word's 0.25.
    // This is why the weighted blend is the default.
    let store = spam_ham_store();
    let classifier = Classifier::new(
        ProbabilityModel::new(0.5, Smoothing::None),
        WordTokenizer::default(),
        DecisionRule::Ratio { threshold: 2.0 },
    );

    let result = classifier.classify(&store, "cheap pills now").unwrap();

    assert_eq!(result.label, Label::Category(name("ham")));
    assert_close(result.log_ratio.unwrap(), 8.0f64.ln());
}

#[test]
fn absolute_threshold_rule() {
    let store = spam_ham_store();
    let lenient = Classifier::new(
        ProbabilityModel::default(),
        WordTokenizer::default(),
        DecisionRule::AbsoluteThreshold { threshold: 0.02 },
    );
    let strict = Classifier::new(
        ProbabilityModel::default(),
        WordTokenizer::default(),
        DecisionRule::AbsoluteThreshold { threshold: 0.03 },
    );

    // best score is 0.5 * 0.375^3 ~= 0.0264
    assert_eq!(
        lenient.label(&store, "cheap pills now").unwrap(),
        Label::Category(name("spam"))
    );
    assert_eq!(strict.label(&store, "cheap pills now").unwrap(), Label::Unknown);
}

#[test]
fn prior_outweighs_a_single_minority_document() {
    let mut store = FrequencyStore::new();
    let majority = vec![("A", "alpha beta gamma"); 10];
    train(&mut store, &majority);
    train(&mut store, &[("B", "delta epsilon zeta")]);
    let classifier = Classifier::default();

    let result = classifier.classify(&store, "delta epsilon zeta").unwrap();

    // Weight 1 caps a once-seen word at (0.5 + 1/3) / 2 against 0.25,
    // which cannot beat a 10:1 prior: 10 * (0.25 / 0.41667)^3 = 2.16
    assert_eq!(result.label, Label::Category(name("A")));
    assert_close(result.log_ratio.unwrap(), 2.16f64.ln());
}

#[test]
fn weak_lead_below_the_ratio_threshold_is_unknown() {
    let mut store = FrequencyStore::new();
    let majority = vec![("A", "alpha beta gamma"); 10];
    train(&mut store, &majority);
    train(&mut store, &[("B", "delta epsilon zeta")]);
    let classifier = Classifier::new(
        ProbabilityModel::default(),
        WordTokenizer::default(),
        DecisionRule::Ratio { threshold: 3.0 },
    );

    let result = classifier.classify(&store, "delta epsilon zeta").unwrap();

    // A leads by 2.16: a real lead, but below 3
    assert_eq!(result.best, Some(name("A")));
    assert_close(result.log_ratio.unwrap(), 2.16f64.ln());
    assert_eq!(result.label, Label::Unknown);
}

#[test]
fn tie_between_later_categories_is_unknown() {
    let mut store = FrequencyStore::new();
    train(
        &mut store,
        &[
            ("apple", "other stuff"),
            ("mango", "common words"),
            ("zebra", "common words"),
        ],
    );
    let classifier = Classifier::default();

    let result = classifier.classify(&store, "common words").unwrap();

    // apple scores lowest and is scanned first; mango and zebra tie above it
    assert!(result.scores[0].log_score < result.scores[1].log_score);
    assert_eq!(result.scores[1].log_score, result.scores[2].log_score);
    assert_eq!(result.best, Some(name("mango")));
    assert_close(result.log_ratio.unwrap(), 0.0);
    assert_eq!(result.label, Label::Unknown);
}

#[test]
fn decide_tracks_the_runner_up_after_a_new_best() {
    let scores = vec![
        CategoryScore { category: name("a"), log_score: 0.1f64.ln() },
        CategoryScore { category: name("b"), log_score: 0.4f64.ln() },
        CategoryScore { category: name("c"), log_score: 0.3f64.ln() },
    ];

    let rule = DecisionRule::Ratio { threshold: 2.0 };
    let decision = decide(&scores, &rule);

    assert_eq!(decision.best.map(|b| b.category.as_str()), Some("b"));
    assert_close(decision.log_ratio.unwrap(), (0.4f64 / 0.3).ln());
    assert_eq!(decision.label, Label::Unknown);

    let lenient = DecisionRule::Ratio { threshold: 1.2 };
    assert_eq!(decide(&scores, &lenient).label, Label::Category(name("b")));
}

#[test]
fn repeated_minority_evidence_beats_the_prior() {
    let mut store = FrequencyStore::new();
    let majority = vec![("A", "alpha beta gamma"); 10];
    train(&mut store, &majority);
    train(&mut store, &[("B", "delta epsilon zeta"); 3]);
    let classifier = Classifier::default();

    let result = classifier.classify(&store, "delta epsilon zeta").unwrap();

    // (3 / 10) * (0.375 / 0.125)^3 = 8.1
    assert_eq!(result.label, Label::Category(name("B")));
    assert_close(result.log_ratio.unwrap(), 8.1f64.ln());
}

#[test]
fn long_texts_do_not_underflow() {
    let mut store = FrequencyStore::new();
    let positive: Vec<String> = (0..1000).map(|i| format!("good{}", word_suffix(i))).collect();
    let negative: Vec<String> = (0..1000).map(|i| format!("bad{}", word_suffix(i))).collect();
    let positive_text = positive.join(" ");
    let negative_text = negative.join(" ");
    train(
        &mut store,
        &[("positive", positive_text.as_str()), ("negative", negative_text.as_str())],
    );
    let classifier = Classifier::default();

    let result = classifier.classify(&store, &positive_text).unwrap();

    assert!(result.scores.iter().all(|s| s.score() == 0.0), "linear scores underflow");
    assert!(result.scores.iter().all(|s| s.log_score.is_finite()));
    assert_eq!(result.label, Label::Category(name("positive")));
}

// Digits are stripped by the tokenizer, so spell indices with letters
fn word_suffix(mut i: usize) -> String {
    let mut s = String::new();
    loop {
        s.push((b'a' + (i % 26) as u8) as char);
        i /= 26;
        if i == 0 {
            break s;
        }
    }
}

#[test]
fn invalid_utf8_is_invalid_input() {
    let store = spam_ham_store();
    let classifier = Classifier::default();

    let err = classifier.classify_bytes(&store, &[0, 159, 146, 150]).unwrap_err();
    assert!(matches!(err, ClassifyError::InvalidInput(_)));

    let ok = classifier.classify_bytes(&store, b"cheap pills now").unwrap();
    assert_eq!(ok.label, Label::Category(name("spam")));
}

#[test]
fn store_failures_surface_as_store_errors() {
    let err = ClassifyError::from(StoreError::UnknownCategory("eggs".to_string()));

    assert!(matches!(
        &err,
        ClassifyError::Store(StoreError::UnknownCategory(name)) if name == "eggs"
    ));
    assert_eq!(err.to_string(), StoreError::UnknownCategory("eggs".to_string()).to_string());
}
