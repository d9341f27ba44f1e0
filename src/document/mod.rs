pub mod document;

pub use crate::types::identifiers::CategoryName;
pub use document::{InputError, LabeledDocument};
