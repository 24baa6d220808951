use std::fmt;

use vmd_schemas::ReorderRequest;

/// Clean / dirty tracking for the local sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrderState {
    /// Local sequence matches what the server last gave or accepted.
    Clean,
    /// Local sequence carries unsaved mutations.
    Dirty { mutations: u32 },
}

impl OrderState {
    pub fn is_dirty(&self) -> bool {
        matches!(self, OrderState::Dirty { .. })
    }

    pub(crate) fn bump(&mut self) {
        *self = match self {
            OrderState::Clean => OrderState::Dirty { mutations: 1 },
            OrderState::Dirty { mutations } => OrderState::Dirty {
                mutations: mutations.saturating_add(1),
            },
        };
    }
}

/// Discrete one-step move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn delta(self) -> isize {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
        }
    }
}

/// What happens to unsaved local work when another course is loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiscardPolicy {
    /// Refuse to replace a dirty sequence.
    Refuse,
    /// The operator confirmed; dirty work may be thrown away.
    Confirmed,
}

/// Answer to "may I switch to another course now?".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SwitchDecision {
    /// Nothing unsaved; switch freely.
    Proceed,
    /// Unsaved mutations would be lost. `pending` is the sequence that would
    /// have been saved.
    ConfirmDiscard {
        course_id: i64,
        mutations: u32,
        pending: ReorderRequest,
    },
}

impl SwitchDecision {
    pub fn needs_confirmation(&self) -> bool {
        matches!(self, SwitchDecision::ConfirmDiscard { .. })
    }
}

/// Rejected reconciler operations. State is untouched whenever one is returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReorderError {
    OutOfRange { index: usize, len: usize },
    UnsavedChanges { course_id: i64, mutations: u32 },
}

impl fmt::Display for ReorderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReorderError::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for {len} content item(s)")
            }
            ReorderError::UnsavedChanges {
                course_id,
                mutations,
            } => write!(
                f,
                "course {course_id} has {mutations} unsaved change(s); save or confirm discard first"
            ),
        }
    }
}

impl std::error::Error for ReorderError {}
