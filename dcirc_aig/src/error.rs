//! Error types for circuit construction, composition and evaluation.

use thiserror::Error;

use crate::PortKind;

/// Errors raised by [`Circuit`](crate::Circuit) operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CircuitError {
    /// Two ports that must agree on width do not.
    #[error("{kind} `{name}` has width {found}, expected {expected}")]
    WidthMismatch {
        /// Kind of the offending port.
        kind: PortKind,
        /// Name of the offending port.
        name: String,
        /// Width required by the other side.
        expected: usize,
        /// Width actually found.
        found: usize,
    },

    /// A port name would be declared twice.
    #[error("duplicate {kind} `{name}`")]
    DuplicatePort {
        /// Kind of the duplicated port.
        kind: PortKind,
        /// The duplicated name.
        name: String,
    },

    /// An operation referenced a port the circuit does not have.
    #[error("unknown {kind} `{name}`")]
    UnknownPort {
        /// Kind of the missing port.
        kind: PortKind,
        /// The missing name.
        name: String,
    },

    /// Evaluation was not given a value for a declared input.
    #[error("missing value for input `{0}`")]
    MissingInput(String),

    /// A latch was declared but never given a next-state function.
    #[error("latch `{0}` has no next-state function")]
    UndrivenLatch(String),
}
