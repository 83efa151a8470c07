// Data source for the calendar engine: JSON snapshots on disk

pub mod cache;
pub mod error;
pub mod rows;
pub mod source;
pub mod store;

pub use cache::SnapshotCache;
pub use error::SourceError;
pub use source::{JsonFileSource, SnapshotSource};
pub use store::ProductStore;

/// Status written on rows registered through [`ProductStore::add_product`].
pub const STATUS_ADDED: &str = "ADICIONADO";
