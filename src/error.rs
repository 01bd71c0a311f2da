use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Hospital,
    Student,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Hospital => write!(f, "hospital"),
            Side::Student => write!(f, "student"),
        }
    }
}

/// Reasons a single preference row is not a permutation of `[1, n]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermutationError {
    #[error("expected {expected} entries, found {found}")]
    WrongLength { expected: usize, found: usize },

    #[error("id 0 is reserved for unmatched agents")]
    ZeroId,

    #[error("id {id} is outside 1..={n}")]
    OutOfRange { id: usize, n: usize },

    #[error("id {id} appears more than once")]
    Duplicate { id: usize },
}

/// Errors raised before matching or verification begins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("invalid {side} preferences for agent {agent}: {reason}")]
    InvalidInput {
        side: Side,
        agent: usize,
        reason: PermutationError,
    },

    #[error("{side} table has {found} preference lists, expected {expected}")]
    TableSize {
        side: Side,
        expected: usize,
        found: usize,
    },

    #[error("instance must contain at least one hospital and one student")]
    EmptyInstance,

    #[error("hospital table has size {hospitals} but student table has size {students}")]
    SizeMismatch { hospitals: usize, students: usize },

    #[error("expected hospital and student tables, got {hospitals} and {students}")]
    SideMismatch { hospitals: Side, students: Side },
}
