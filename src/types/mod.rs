pub mod classification;
pub mod identifiers;

pub use classification::{CategoryScore, Classification, ClassifyError, Label};
pub use identifiers::{CategoryName, SnapshotVersion, UNKNOWN_LABEL};
