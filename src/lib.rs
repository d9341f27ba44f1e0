//! Deterministic Naive Bayes text classification.
//!
//! `bayes-core` provides tokenization, word/category frequency counting,
//! smoothed probability estimates, and a classifier that either picks a
//! trained category or answers `unknown` when the evidence is too close to
//! call. Stores snapshot to self-verifying JSON and reload exactly.
//! All operations are deterministic: identical inputs always produce
//! identical outputs.

pub mod classify;
pub mod config;
pub mod document;
pub mod store;
pub mod tokenize;
pub mod training;
pub mod types;
