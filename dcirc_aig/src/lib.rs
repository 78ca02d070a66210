//! Bit-vector sequential circuits built on an and-inverter graph.
//!
//! A [`Circuit`] is a sea of two-input AND nodes with complemented edges,
//! exposed through named, fixed-width input and output ports and named
//! latches. Circuits are values: every operation (composition, relabeling,
//! loopback, unrolling) returns a new circuit and leaves its operands alone.
//!
//! Circuits are usually assembled with a [`CircuitBuilder`]:
//!
//! ```ignore
//! use dcirc_aig::{CircuitBuilder, Word};
//!
//! let mut b = CircuitBuilder::new();
//! let x = b.input("x", 3);
//! let one = b.uint(3, 1);
//! let z = b.add(&x, &one);
//! b.output("z", &z);
//! let incr = b.build()?;
//! ```

mod aig;
mod builder;
mod bus;
mod circuit;
mod error;
mod loopback;
mod port;
mod timed;
mod unroll;
mod word;

pub use aig::{Aig, Lit, MAX_NODES, Node};
pub use builder::CircuitBuilder;
pub use bus::Bus;
pub use circuit::{Circuit, Latch};
pub use error::CircuitError;
pub use loopback::Wiring;
pub use port::{Assignment, PortKind};
pub use timed::{split_timed_name, timed_name};
pub use unroll::UnrollOptions;
pub use word::Word;
