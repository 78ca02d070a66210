#![allow(dead_code)]

use std::sync::OnceLock;

use dcirc_aig::{Assignment, Circuit, CircuitBuilder, Word};

pub fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Build an assignment of unsigned values.
pub fn uints(width: usize, pairs: &[(&str, u64)]) -> Assignment {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_owned(), Word::from_uint(width, *value)))
        .collect()
}

/// `z = x + 1` over `width` bits.
pub fn incrementer(width: usize) -> Circuit {
    let mut b = CircuitBuilder::new();
    let x = b.input("x", width);
    let one = b.uint(width, 1);
    let z = b.add(&x, &one);
    b.output("z", &z);
    b.build().expect("incrementer")
}

/// `z = x + y` over `width` bits.
pub fn adder(width: usize) -> Circuit {
    let mut b = CircuitBuilder::new();
    let x = b.input("x", width);
    let y = b.input("y", width);
    let z = b.add(&x, &y);
    b.output("z", &z);
    b.build().expect("adder")
}

/// A counter latch `count` that adds `x` every step and exposes the new total.
pub fn counter(width: usize) -> Circuit {
    let mut b = CircuitBuilder::new();
    let x = b.input("x", width);
    let count = b.latch("count", &Word::zeros(width));
    let next = b.add(&count, &x);
    b.set_next("count", &next);
    b.output("total", &next);
    b.build().expect("counter")
}
