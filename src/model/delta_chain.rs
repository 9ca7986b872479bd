//! Base content plus an append-only list of edits
//!
//! Any historical state is reconstructed by replaying a prefix of the
//! recorded edits over the base. Nothing is cached: every restore is a full
//! replay, trading restore time for memory.

use super::edit::Edit;
use super::memory::DEFAULT_EDIT_OVERHEAD;
use crate::error::{HistoryError, Result};

/// Replays above this many edits are logged as a warning
pub const DEFAULT_LONG_REPLAY_WARNING: usize = 10_000;

#[derive(Clone, Debug)]
pub struct DeltaChain {
    /// Full text at the chain's inception
    base_content: String,

    /// Edits in chronological (and replay) order
    edits: Vec<Edit>,

    /// Fixed bookkeeping bytes charged per edit
    overhead: usize,

    long_replay_warning: usize,
}

impl DeltaChain {
    /// Start an empty chain seeded with `base_content`
    pub fn new(base_content: impl Into<String>) -> Self {
        Self::with_overhead(base_content, DEFAULT_EDIT_OVERHEAD)
    }

    /// Start an empty chain with a custom per-edit overhead
    pub fn with_overhead(base_content: impl Into<String>, overhead: usize) -> Self {
        Self {
            base_content: base_content.into(),
            edits: Vec::new(),
            overhead,
            long_replay_warning: DEFAULT_LONG_REPLAY_WARNING,
        }
    }

    pub fn set_long_replay_warning(&mut self, edits: usize) {
        self.long_replay_warning = edits;
    }

    /// Append an edit.
    ///
    /// Bounds are not checked here; a bad edit surfaces when it is replayed.
    pub fn record(&mut self, edit: Edit) {
        tracing::trace!("delta chain: recording edit #{}: {}", self.edits.len(), edit);
        self.edits.push(edit);
    }

    /// Replay every edit over the base and return the resulting content
    pub fn restore(&self) -> Result<String> {
        self.restore_up_to(self.edits.len())
    }

    /// Replay only the first `n` edits over the base.
    ///
    /// `restore_up_to(0)` is the base content itself.
    pub fn restore_up_to(&self, n: usize) -> Result<String> {
        if n > self.edits.len() {
            return Err(HistoryError::IndexOutOfRange {
                requested: n,
                available: self.edits.len(),
            });
        }

        if n > self.long_replay_warning {
            tracing::warn!(
                "delta chain: replaying {} edits over {} base bytes",
                n,
                self.base_content.len()
            );
        } else {
            tracing::debug!("delta chain: replaying {} of {} edits", n, self.edits.len());
        }

        let mut content = self.base_content.clone();
        for (i, edit) in self.edits[..n].iter().enumerate() {
            tracing::trace!("delta chain: replay #{}: {}", i, edit);
            edit.apply_in_place(&mut content)?;
        }
        Ok(content)
    }

    /// Base length plus the cost of every recorded edit
    pub fn memory_usage(&self) -> usize {
        self.base_content.len()
            + self
                .edits
                .iter()
                .map(|edit| edit.memory_usage(self.overhead))
                .sum::<usize>()
    }

    pub fn base_content(&self) -> &str {
        &self.base_content
    }

    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn overhead(&self) -> usize {
        self.overhead
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hello_chain() -> DeltaChain {
        let mut chain = DeltaChain::new("Hello");
        chain.record(Edit::insert(5, " World"));
        chain.record(Edit::insert(11, "!"));
        chain
    }

    #[test]
    fn test_empty_chain_restores_base() {
        let chain = DeltaChain::new("base");
        assert!(chain.is_empty());
        assert_eq!(chain.restore().unwrap(), "base");
        assert_eq!(chain.memory_usage(), 4);
    }

    #[test]
    fn test_restore_replays_all_edits() {
        let chain = hello_chain();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.restore().unwrap(), "Hello World!");
    }

    #[test]
    fn test_restore_up_to() {
        let chain = hello_chain();
        assert_eq!(chain.restore_up_to(0).unwrap(), "Hello");
        assert_eq!(chain.restore_up_to(1).unwrap(), "Hello World");
        assert_eq!(chain.restore_up_to(2).unwrap(), "Hello World!");
        assert_eq!(
            chain.restore_up_to(3),
            Err(HistoryError::IndexOutOfRange {
                requested: 3,
                available: 2
            })
        );
    }

    #[test]
    fn test_restore_surfaces_bad_edit() {
        let mut chain = DeltaChain::new("abc");
        chain.record(Edit::delete(2, "cdef"));
        assert!(matches!(
            chain.restore(),
            Err(HistoryError::OutOfBounds { .. })
        ));
        // The prefix before the bad edit is still reachable
        assert_eq!(chain.restore_up_to(0).unwrap(), "abc");
    }

    #[test]
    fn test_memory_usage() {
        let chain = hello_chain();
        // base 5, " World" 6 + 24, "!" 1 + 24
        assert_eq!(chain.memory_usage(), 5 + 30 + 25);

        let mut chain = DeltaChain::with_overhead("Hello", 16);
        chain.record(Edit::insert(5, " World"));
        assert_eq!(chain.overhead(), 16);
        assert_eq!(chain.memory_usage(), 5 + 6 + 16);
    }

    #[test]
    fn test_mixed_edits() {
        let mut chain = DeltaChain::new("The quick brown fox");
        chain.record(Edit::replace(4, "quick", "slow"));
        chain.record(Edit::delete(8, " brown"));
        chain.record(Edit::insert(0, "See: "));
        assert_eq!(chain.restore().unwrap(), "See: The slow fox");
        assert_eq!(chain.restore_up_to(2).unwrap(), "The slow fox");
        assert_eq!(chain.base_content(), "The quick brown fox");
        assert_eq!(chain.edits()[0], Edit::replace(4, "quick", "slow"));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Operations expressed relative to the current content length
    #[derive(Debug, Clone)]
    enum Op {
        Insert(prop::sample::Index, String),
        Delete(prop::sample::Index, prop::sample::Index),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (any::<prop::sample::Index>(), "[a-z]{1,6}").prop_map(|(i, s)| Op::Insert(i, s)),
            (any::<prop::sample::Index>(), any::<prop::sample::Index>())
                .prop_map(|(i, w)| Op::Delete(i, w)),
        ]
    }

    /// Turn ops into concrete edits, tracking the reference content
    fn build(base: &str, ops: &[Op]) -> (Vec<Edit>, Vec<String>) {
        let mut content = base.to_string();
        let mut edits = Vec::new();
        let mut states = Vec::new();
        for op in ops {
            let edit = match op {
                Op::Insert(i, text) => Edit::insert(i.index(content.len() + 1), text.clone()),
                Op::Delete(i, w) => {
                    let pos = i.index(content.len() + 1);
                    let len = w.index(content.len() - pos + 1);
                    Edit::delete(pos, &content[pos..pos + len])
                }
            };
            // Reference implementation: plain string splicing
            let (pos, removed) = (edit.position(), edit.removed_text().len());
            content = format!(
                "{}{}{}",
                &content[..pos],
                edit.inserted_text(),
                &content[pos + removed..]
            );
            states.push(content.clone());
            edits.push(edit);
        }
        (edits, states)
    }

    proptest! {
        /// Replaying any prefix matches the reference state at that point
        #[test]
        fn replay_matches_reference(base in "[a-z]{0,20}", ops in prop::collection::vec(op(), 0..20)) {
            let (edits, states) = build(&base, &ops);
            let mut chain = DeltaChain::new(base.clone());
            for edit in edits {
                chain.record(edit);
            }
            prop_assert_eq!(chain.restore_up_to(0).unwrap(), base);
            for (n, state) in states.iter().enumerate() {
                prop_assert_eq!(&chain.restore_up_to(n + 1).unwrap(), state);
            }
        }

        /// Memory never shrinks, and grows by exactly the edit's cost
        #[test]
        fn memory_grows_by_edit_cost(base in "[a-z]{0,20}", ops in prop::collection::vec(op(), 0..20)) {
            let (edits, _) = build(&base, &ops);
            let mut chain = DeltaChain::new(base);
            for edit in edits {
                let before = chain.memory_usage();
                let cost = edit.removed_text().len() + edit.inserted_text().len() + chain.overhead();
                chain.record(edit);
                prop_assert!(chain.memory_usage() >= before);
                prop_assert_eq!(chain.memory_usage() - before, cost);
            }
        }
    }
}
