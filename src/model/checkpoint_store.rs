//! Dual bookkeeping for comparing history strategies
//!
//! The [`DeltaChain`] is the single source of truth for history. The list
//! of [`FullSnapshot`]s is an instrumentation-only shadow: it records what a
//! naive copy-everything history would have stored at each checkpoint, so
//! the two costs can be compared on the same edit sequence. Nothing is ever
//! restored from it.

use super::delta_chain::DeltaChain;
use super::edit::Edit;
use super::memory::savings_percent;
use serde::{Deserialize, Serialize};

/// A full copy of the content at one checkpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullSnapshot {
    /// Checkpoint index this copy was taken at
    pub index: usize,
    pub content: String,
}

impl FullSnapshot {
    pub fn memory_usage(&self) -> usize {
        self.content.len()
    }
}

#[derive(Clone, Debug)]
pub struct CheckpointStore {
    chain: DeltaChain,
    /// Shadow: full copies a naive history would have kept
    full_snapshots: Vec<FullSnapshot>,
    /// Next checkpoint index to hand out
    next_index: usize,
}

impl CheckpointStore {
    pub fn new(chain: DeltaChain) -> Self {
        Self {
            chain,
            full_snapshots: Vec::new(),
            next_index: 0,
        }
    }

    /// Append an edit to the delta chain
    pub fn record_edit(&mut self, edit: Edit) {
        self.chain.record(edit);
    }

    /// Record a full copy of `content` in the shadow list.
    ///
    /// Returns the checkpoint index the copy is tagged with.
    pub fn record_full_snapshot(&mut self, content: impl Into<String>) -> usize {
        let index = self.next_index;
        self.next_index += 1;
        let snapshot = FullSnapshot {
            index,
            content: content.into(),
        };
        tracing::debug!(
            "checkpoint store: full snapshot #{} ({} bytes)",
            index,
            snapshot.memory_usage()
        );
        self.full_snapshots.push(snapshot);
        index
    }

    /// Drop the most recent full copy, mirroring a LIFO pop on a naive history
    pub fn pop_full_snapshot(&mut self) -> Option<FullSnapshot> {
        self.full_snapshots.pop()
    }

    /// Sum of all full-copy sizes
    pub fn total_full_snapshot_memory(&self) -> usize {
        self.full_snapshots.iter().map(FullSnapshot::memory_usage).sum()
    }

    pub fn total_delta_memory(&self) -> usize {
        self.chain.memory_usage()
    }

    /// Percentage of the full-copy cost saved by the delta chain.
    ///
    /// Zero when no full snapshot has been recorded. Negative when the
    /// chain costs more than the copies would have.
    pub fn savings_percent(&self) -> f64 {
        savings_percent(self.total_full_snapshot_memory(), self.total_delta_memory())
    }

    pub fn chain(&self) -> &DeltaChain {
        &self.chain
    }

    pub fn full_snapshots(&self) -> &[FullSnapshot] {
        &self.full_snapshots
    }
}
