//! Naming defaults shared by every validated circuit.
//!
//! The validity output is called [`DEFAULT_VALID_ID`] unless a caller picks
//! another name. Composition renames validity outputs to names produced by
//! [`fresh_name`] so the two operands never collide:
//!
//! ```ignore
//! use dcirc_core::{fresh_name, DEFAULT_VALID_ID};
//! let a = fresh_name(DEFAULT_VALID_ID); // "##valid#0"
//! let b = fresh_name(DEFAULT_VALID_ID); // "##valid#1"
//! ```
//!
//! Names starting with `##` are reserved for generated ports.

use std::sync::atomic::{AtomicU64, Ordering};

/// Name of the validity output when none is given.
pub const DEFAULT_VALID_ID: &str = "##valid";

static FRESH: AtomicU64 = AtomicU64::new(0);

/// A process-wide unique name `<prefix>#<n>`.
#[must_use]
pub fn fresh_name(prefix: &str) -> String {
    let id = FRESH.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}#{id}")
}
