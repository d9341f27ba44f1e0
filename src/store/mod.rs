pub mod frequency;
pub mod persistence;
pub mod snapshot;

pub use frequency::{CategoryCounts, FrequencyStore, StoreError, WordRecord};
pub use persistence::{load_snapshot, read_snapshot, save_snapshot, PersistenceError};
pub use snapshot::{StoreSnapshot, SNAPSHOT_FORMAT};
