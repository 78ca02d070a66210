//! Port kinds and wire-level assignments.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Word;

/// A wire-level assignment: one [`Word`] per port or latch name.
pub type Assignment = IndexMap<String, Word>;

/// The three kinds of named interface a circuit exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortKind {
    /// Primary input.
    Input,
    /// Primary output.
    Output,
    /// Internal state element.
    Latch,
}

impl std::fmt::Display for PortKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Output => write!(f, "output"),
            Self::Latch => write!(f, "latch"),
        }
    }
}
