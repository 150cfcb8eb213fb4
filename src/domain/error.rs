//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent allocation rule violations.
/// These are independent of input parsing and terminal concerns.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("unknown currency: {0} (expected USD, EUR or CAD)")]
    UnknownCurrency(String),

    #[error("person {} does not exist (split has {people} people)", .index + 1)]
    ShareOutOfRange { index: usize, people: usize },

    #[error("percentage must be a finite number, got {0}")]
    InvalidPercentage(f64),

    #[error("percentage for person {} must not be negative, got {value}", .index + 1)]
    NegativePercentage { index: usize, value: f64 },

    #[error("a split needs at least one share")]
    EmptySplit,

    #[error("percentages must sum to 100, got {0}")]
    UnbalancedPercentages(f64),
}
