// Checkpoint history library - exposes all core modules for testing

pub mod config;
pub mod error;
pub mod model;
pub mod scenario;

#[cfg(feature = "runtime")]
pub mod services;

pub use error::{HistoryError, Result};
pub use model::checkpoint_store::{CheckpointStore, FullSnapshot};
pub use model::delta_chain::DeltaChain;
pub use model::document::Document;
pub use model::edit::{Edit, EditKind};
pub use model::memory::{MemoryReport, DEFAULT_EDIT_OVERHEAD};
pub use model::session::{CheckpointId, EditSession};
