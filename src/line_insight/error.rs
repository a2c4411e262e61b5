//! Error types for phasor arithmetic and the line status pipeline.

use thiserror::Error;

use super::types::NodeNumber;

/// Invalid phasor arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PhasorError {
    #[error("divisor phasor is 0")]
    DivideByZero,

    #[error("base is 0 and power {exponent} is non-positive")]
    ZeroToNonPositivePower { exponent: f64 },
}

/// Errors raised while building samples or predicting a line status.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LineInsightError {
    #[error("phasor arithmetic failed: {0}")]
    Phasor(#[from] PhasorError),

    #[error("insufficient number of samples to calculate a phasor: {found} (need at least 2)")]
    InsufficientSamples { found: usize },

    #[error("node {node} has an invalid rating {rating} (must be finite and positive)")]
    InvalidRating { node: NodeNumber, rating: f64 },

    #[error("node {node} has more than one current going to node {destination}")]
    DuplicateDestination {
        node: NodeNumber,
        destination: NodeNumber,
    },

    #[error("node {node} was given parameter {name} starting at node {start}")]
    ForeignParameter {
        node: NodeNumber,
        name: String,
        start: NodeNumber,
    },

    #[error("node {node} was given voltage {name} measured against node {destination} instead of ground")]
    VoltageNotToGround {
        node: NodeNumber,
        name: String,
        destination: NodeNumber,
    },

    #[error("unable to find a current in node {from} going to node {to}")]
    MissingLineCurrent { from: NodeNumber, to: NodeNumber },

    #[error("line samples are not samples of the same line: {reason}")]
    NotSameLine { reason: String },

    #[error("{group} weight {weight} is invalid (must be finite and non-negative)")]
    InvalidWeight { group: &'static str, weight: f64 },

    #[error("noise of {percent}% is invalid for line sample generation (must be within 0 - 100%)")]
    InvalidNoisePercent { percent: f64 },

    #[error("number of nearest neighbors {requested} is invalid for {available} known samples")]
    InvalidNeighborCount { requested: usize, available: usize },
}

pub type LineInsightResult<T> = Result<T, LineInsightError>;
