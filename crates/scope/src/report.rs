//! Diagnostics describing how a block ran.

use tryscope_core::{BlockState, ResourceId};

/// What a block did, in the order it did it.
///
/// The report is independent of the [`Outcome`](tryscope_core::Outcome): it
/// records the states the block walked through and which slots were
/// acquired, released and skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockReport {
    name: String,
    states: Vec<BlockState>,
    acquired: Vec<ResourceId>,
    released: Vec<ResourceId>,
    skipped: Vec<ResourceId>,
}

impl BlockReport {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            states: vec![BlockState::NotStarted],
            ..Default::default()
        }
    }

    pub(crate) fn transition(&mut self, next: BlockState) {
        debug_assert!(
            self.state().can_transition_to(next),
            "illegal block transition {} -> {}",
            self.state(),
            next
        );
        tracing::trace!(scope = %self.name, from = %self.state(), to = %next, "block_transition");
        self.states.push(next);
    }

    pub(crate) fn record_acquired(&mut self, id: ResourceId) {
        self.acquired.push(id);
    }

    pub(crate) fn record_release_logs(&mut self, released: Vec<ResourceId>, skipped: Vec<ResourceId>) {
        self.released = released;
        self.skipped = skipped;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current (for a finished block: terminal) state
    pub fn state(&self) -> BlockState {
        self.states.last().copied().unwrap_or_default()
    }

    /// Every state visited, starting with `NotStarted`
    pub fn states(&self) -> &[BlockState] {
        &self.states
    }

    /// Live resources in acquisition order
    pub fn acquired(&self) -> &[ResourceId] {
        &self.acquired
    }

    /// Resources whose release was attempted, in release order
    pub fn released(&self) -> &[ResourceId] {
        &self.released
    }

    /// Absent slots passed over during release
    pub fn skipped(&self) -> &[ResourceId] {
        &self.skipped
    }

    /// Labels of `released`, handy for asserting on release order
    pub fn release_order(&self) -> Vec<&str> {
        self.released.iter().map(|id| id.label.as_str()).collect()
    }

    pub fn body_ran(&self) -> bool {
        self.states.contains(&BlockState::RunningBody)
    }
}
