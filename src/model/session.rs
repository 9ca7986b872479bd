//! Editing session: a document and its history under one owner
//!
//! The session owns the [`Document`] and the [`CheckpointStore`]
//! exclusively. Every mutation goes through the session so the edit it
//! produces lands in the delta chain immediately. Reporting code gets a
//! shared `&CheckpointStore` and never a second writable handle.
//!
//! Checkpoints are just edit counts: restoring one replays the chain up to
//! that count. The restore itself is recorded as one more edit, so the chain
//! stays append-only and still reproduces the live document.

use super::checkpoint_store::CheckpointStore;
use super::delta_chain::DeltaChain;
use super::document::Document;
use super::edit::Edit;
use super::memory::MemoryReport;
use crate::config::HistoryConfig;
use crate::error::{HistoryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a checkpoint within one session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckpointId(pub usize);

impl fmt::Display for CheckpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Checkpoint {
    id: CheckpointId,
    /// Number of chain edits that make up this state
    edit_count: usize,
}

#[derive(Debug)]
pub struct EditSession {
    document: Document,
    store: CheckpointStore,
    /// Live checkpoints, oldest first
    checkpoints: Vec<Checkpoint>,
}

impl EditSession {
    /// Open a session with the default history settings
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_config(content, &HistoryConfig::default())
    }

    pub fn with_config(content: impl Into<String>, config: &HistoryConfig) -> Self {
        let content = content.into();
        let mut chain = DeltaChain::with_overhead(content.clone(), config.edit_overhead_bytes);
        chain.set_long_replay_warning(config.long_replay_warning);

        tracing::info!(
            "session: opened with {} bytes (edit overhead {} bytes)",
            content.len(),
            config.edit_overhead_bytes
        );

        let mut session = Self {
            document: Document::new(content),
            store: CheckpointStore::new(chain),
            checkpoints: Vec::new(),
        };
        if config.checkpoint_on_open {
            session.checkpoint();
        }
        session
    }

    pub fn insert(&mut self, position: usize, text: &str) -> Result<()> {
        let edit = self.document.insert(position, text)?;
        self.store.record_edit(edit);
        Ok(())
    }

    pub fn delete(&mut self, position: usize, length: usize) -> Result<()> {
        let edit = self.document.delete(position, length)?;
        self.store.record_edit(edit);
        Ok(())
    }

    pub fn replace(&mut self, position: usize, length: usize, text: &str) -> Result<()> {
        let edit = self.document.replace(position, length, text)?;
        self.store.record_edit(edit);
        Ok(())
    }

    /// Append to the end of the document
    pub fn append(&mut self, text: &str) -> Result<()> {
        self.insert(self.document.len(), text)
    }

    /// Mark the current state so it can be restored later.
    ///
    /// Also records a full copy in the comparison shadow.
    pub fn checkpoint(&mut self) -> CheckpointId {
        let id = CheckpointId(self.store.record_full_snapshot(self.document.as_str()));
        let edit_count = self.store.chain().len();
        self.checkpoints.push(Checkpoint { id, edit_count });
        tracing::debug!("session: checkpoint {} at edit {}", id, edit_count);
        id
    }

    /// Bring the document back to the state saved at `id`
    pub fn restore_checkpoint(&mut self, id: CheckpointId) -> Result<()> {
        let checkpoint = self
            .checkpoints
            .iter()
            .find(|c| c.id == id)
            .copied()
            .ok_or(HistoryError::UnknownCheckpoint { id: id.0 })?;
        tracing::debug!("session: restoring checkpoint {}", id);
        self.restore_edit_count(checkpoint.edit_count)
    }

    /// Drop the most recent checkpoint and return to the state it saved.
    ///
    /// Returns the restored content.
    /// Nothing is removed if the restore fails.
    pub fn pop_checkpoint(&mut self) -> Result<String> {
        let checkpoint = *self.checkpoints.last().ok_or(HistoryError::EmptyHistory)?;
        self.restore_edit_count(checkpoint.edit_count)?;
        self.checkpoints.pop();
        self.store.pop_full_snapshot();
        tracing::debug!(
            "session: popped checkpoint {} ({} left)",
            checkpoint.id,
            self.checkpoints.len()
        );
        Ok(self.document.content())
    }

    /// Content as it was right after the first `n` edits
    pub fn content_at(&self, n: usize) -> Result<String> {
        self.store.chain().restore_up_to(n)
    }

    fn restore_edit_count(&mut self, edit_count: usize) -> Result<()> {
        let target = self.store.chain().restore_up_to(edit_count)?;
        if let Some(edit) = Edit::between(self.document.as_str(), &target) {
            self.document.apply_edit(&edit)?;
            self.store.record_edit(edit);
        }
        Ok(())
    }

    /// Check that replaying the whole chain gives the live content
    pub fn verify(&self) -> Result<bool> {
        Ok(self.store.chain().restore()? == self.document.as_str())
    }

    pub fn content(&self) -> String {
        self.document.content()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Read-only view of the history for reporting
    pub fn store(&self) -> &CheckpointStore {
        &self.store
    }

    pub fn checkpoint_ids(&self) -> Vec<CheckpointId> {
        self.checkpoints.iter().map(|c| c.id).collect()
    }

    pub fn report(&self) -> MemoryReport {
        MemoryReport::from_store(&self.store)
    }
}
