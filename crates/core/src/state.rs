//! Lifecycle states of a scoped block

use std::fmt;

/// States a block passes through.
///
/// ```text
/// NotStarted -> Acquiring -> AcquireFailed -> Releasing -> Done
///                         \-> Acquired -> RunningBody -> Releasing -> Done
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BlockState {
    #[default]
    NotStarted,
    Acquiring,
    AcquireFailed,
    Acquired,
    RunningBody,
    Releasing,
    Done,
}

impl BlockState {
    /// Get the state name
    pub fn name(self) -> &'static str {
        match self {
            BlockState::NotStarted => "NotStarted",
            BlockState::Acquiring => "Acquiring",
            BlockState::AcquireFailed => "AcquireFailed",
            BlockState::Acquired => "Acquired",
            BlockState::RunningBody => "RunningBody",
            BlockState::Releasing => "Releasing",
            BlockState::Done => "Done",
        }
    }

    /// Whether `next` is a legal successor of this state
    pub fn can_transition_to(self, next: BlockState) -> bool {
        use BlockState::*;
        matches!(
            (self, next),
            (NotStarted, Acquiring)
                | (Acquiring, AcquireFailed)
                | (Acquiring, Acquired)
                | (AcquireFailed, Releasing)
                | (Acquired, RunningBody)
                | (RunningBody, Releasing)
                | (Releasing, Done)
        )
    }

    pub fn is_terminal(self) -> bool {
        self == BlockState::Done
    }
}

impl fmt::Display for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
