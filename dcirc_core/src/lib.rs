//! Validated discrete circuits.
//!
//! A [`DiscreteCirc`] couples a bit-vector [`Circuit`] with
//! [`Encoding`]s for its ports and a single-bit validity output. Inputs
//! are given as application [`Value`]s, encoded onto wires, evaluated, and
//! rejected with [`DiscreteError::InvalidInput`] when the validity output is
//! false. Composition (`|`, `>>`, `<<`), relabeling, loopback and unrolling
//! all keep validity and encodings consistent.
//!
//! ```ignore
//! use dcirc_core::{CircuitBuilder, DiscreteCirc, Encoding, Value, Values};
//!
//! let mut b = CircuitBuilder::new();
//! let x = b.input("x", 3);
//! let one = b.uint(3, 1);
//! let two = b.uint(3, 2);
//! let z = b.add(&x, &one);
//! let ok = b.ule(&x, &two);
//! b.output("z", &z);
//! b.output("##valid", &ok);
//!
//! let incr = DiscreteCirc::builder(b.build()?)
//!     .input_encoding("x", Encoding::unsigned(3))
//!     .output_encoding("z", Encoding::unsigned(3))
//!     .build()?;
//!
//! let inputs: Values = [("x".to_owned(), Value::UInt(2))].into_iter().collect();
//! let (outputs, _) = incr.evaluate(&inputs, None)?;
//! assert_eq!(outputs["z"], Value::UInt(3));
//! ```

mod algebra;
mod config;
mod discrete;
mod encoding;
mod error;
mod unroll;
mod value;

pub use config::{DEFAULT_VALID_ID, fresh_name};
pub use discrete::{DiscreteCirc, DiscreteCircBuilder};
pub use encoding::{Encoding, EncodingTable};
pub use error::{DiscreteError, EncodingError};
pub use value::{Value, Values};

pub use dcirc_aig::{
    Assignment, Circuit, CircuitBuilder, CircuitError, PortKind, UnrollOptions, Wiring, Word,
    split_timed_name, timed_name,
};
