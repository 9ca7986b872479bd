//! Memory cost model for history strategies
//!
//! Costs are byte counts: a full snapshot costs its content length, an edit
//! costs its removed and inserted text plus a fixed per-edit overhead that
//! stands in for the kind tag, position and timestamp fields.

use super::checkpoint_store::CheckpointStore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-edit bookkeeping bytes used unless configured otherwise
pub const DEFAULT_EDIT_OVERHEAD: usize = 24;

/// `(full - delta) / full * 100`, or zero when nothing was snapshotted
pub fn savings_percent(full_memory: usize, delta_memory: usize) -> f64 {
    if full_memory == 0 {
        return 0.0;
    }
    (full_memory as f64 - delta_memory as f64) / full_memory as f64 * 100.0
}

/// Side-by-side cost of the delta chain and the naive full-copy history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryReport {
    pub base_bytes: usize,
    pub edit_count: usize,
    pub edit_overhead: usize,
    pub delta_bytes: usize,
    pub snapshot_count: usize,
    pub full_snapshot_bytes: usize,
    pub savings_percent: f64,
}

impl MemoryReport {
    /// Read the current numbers from a store
    pub fn from_store(store: &CheckpointStore) -> Self {
        let chain = store.chain();
        Self {
            base_bytes: chain.base_content().len(),
            edit_count: chain.len(),
            edit_overhead: chain.overhead(),
            delta_bytes: store.total_delta_memory(),
            snapshot_count: store.full_snapshots().len(),
            full_snapshot_bytes: store.total_full_snapshot_memory(),
            savings_percent: store.savings_percent(),
        }
    }

    /// Bytes the delta chain saves (negative when it costs more)
    pub fn saved_bytes(&self) -> i64 {
        self.full_snapshot_bytes as i64 - self.delta_bytes as i64
    }
}

impl fmt::Display for MemoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(60);
        writeln!(f, "{rule}")?;
        writeln!(f, "Delta chain:")?;
        writeln!(f, "  base:    {} bytes", self.base_bytes)?;
        writeln!(
            f,
            "  edits:   {} (overhead {} bytes each)",
            self.edit_count, self.edit_overhead
        )?;
        writeln!(f, "  total:   {} bytes", self.delta_bytes)?;
        writeln!(f, "Full snapshots:")?;
        writeln!(f, "  count:   {}", self.snapshot_count)?;
        writeln!(f, "  total:   {} bytes", self.full_snapshot_bytes)?;
        writeln!(
            f,
            "Savings:   {:.1}% ({} bytes)",
            self.savings_percent,
            self.saved_bytes()
        )?;
        write!(f, "{rule}")
    }
}
