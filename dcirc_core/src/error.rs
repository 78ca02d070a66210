//! Errors raised by encodings and validated circuits.

use dcirc_aig::CircuitError;
use itertools::Itertools;
use thiserror::Error;

use crate::{Value, Values};

/// A value fell outside the domain of an [`Encoding`](crate::Encoding).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// The encoding does not accept values of this shape.
    #[error("{encoding} encoding cannot represent {value}")]
    Unsupported {
        /// Label of the rejecting encoding.
        encoding: String,
        /// The rejected value.
        value: Value,
    },

    /// The value has the right shape but does not fit in the port.
    #[error("{value} does not fit in {width} bits")]
    OutOfRange {
        /// The rejected value.
        value: Value,
        /// Width of the port.
        width: usize,
    },
}

/// Errors raised by [`DiscreteCirc`](crate::DiscreteCirc) construction,
/// composition and evaluation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiscreteError {
    /// The validity output is missing, or is not a single bit.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A rename would give the validity output the name of another output.
    #[error("output `{0}` already exists")]
    NameConflict(String),

    /// A relabeling touched the validity output.
    #[error("`{0}` is the validity output and cannot be relabeled")]
    ReservedName(String),

    /// The assignment does not satisfy the validity predicate.
    #[error("invalid input {}", render_values(.inputs))]
    InvalidInput {
        /// The assignment as supplied, before encoding.
        inputs: Values,
    },

    /// A supplied value could not be encoded for its port.
    #[error("cannot encode input `{port}`: {source}")]
    Encoding {
        /// The port whose encoding failed.
        port: String,
        /// Why it failed.
        #[source]
        source: EncodingError,
    },

    /// The underlying circuit rejected the operation.
    #[error(transparent)]
    Circuit(#[from] CircuitError),
}

fn render_values(values: &Values) -> String {
    format!(
        "{{{}}}",
        values
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .join(", ")
    )
}
