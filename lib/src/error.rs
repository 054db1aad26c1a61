use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Result type alias for balancing operations
pub type Result<T> = std::result::Result<T, BalanceError>;

/// Side of a chemical equation
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Left-hand side (reactants)
    Reactants,
    /// Right-hand side (products)
    Products,
}
impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Reactants => write!(f, "reactant"),
            Side::Products => write!(f, "product"),
        }
    }
}

/// Errors that can occur while parsing or balancing an equation
#[derive(Error, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum BalanceError {
    /// One side of the equation has no compounds after splitting and trimming
    #[error("the {side} side of the equation contains no compounds")]
    EmptySide { side: Side },

    /// A formula does not match the grammar, or nests groups too deeply
    #[error("malformed formula '{formula}' at position {position}: {reason}")]
    MalformedFormula {
        formula: String,
        position: usize,
        reason: String,
    },

    /// Only the trivial solution exists, or the solution is not sign-consistent
    #[error("equation cannot be balanced: {reason}")]
    NoSolution { reason: String },

    /// A single-line equation must contain exactly one arrow
    #[error("there should be exactly one arrow in the equation, found {found}")]
    InvalidArrowCount { found: usize },

    /// Configuration could not be read or parsed
    #[error("invalid configuration: {reason}")]
    Config { reason: String },
}

impl BalanceError {
    /// Create a MalformedFormula error
    pub fn malformed(formula: impl Into<String>, position: usize, reason: impl Into<String>) -> Self {
        BalanceError::MalformedFormula {
            formula: formula.into(),
            position,
            reason: reason.into(),
        }
    }

    /// Create a NoSolution error
    pub fn no_solution(reason: impl Into<String>) -> Self {
        BalanceError::NoSolution {
            reason: reason.into(),
        }
    }

    /// Create a Config error
    pub fn config(reason: impl Into<String>) -> Self {
        BalanceError::Config {
            reason: reason.into(),
        }
    }

    /// Short, stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            BalanceError::EmptySide { .. } => "EMPTY_SIDE",
            BalanceError::MalformedFormula { .. } => "MALFORMED_FORMULA",
            BalanceError::NoSolution { .. } => "NO_SOLUTION",
            BalanceError::InvalidArrowCount { .. } => "INVALID_ARROW_COUNT",
            BalanceError::Config { .. } => "CONFIG",
        }
    }

    /// Whether the failure comes from the input text rather than from the chemistry
    pub fn is_input_error(&self) -> bool {
        !matches!(self, BalanceError::NoSolution { .. })
    }
}
