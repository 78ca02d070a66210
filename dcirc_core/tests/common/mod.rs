#![allow(dead_code)]

use std::sync::OnceLock;

use dcirc_core::{
    Circuit, CircuitBuilder, DEFAULT_VALID_ID, DiscreteCirc, Encoding, Value, Values, Wiring,
};

pub fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn values(pairs: &[(&str, Value)]) -> Values {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_owned(), value.clone()))
        .collect()
}

pub fn uints(pairs: &[(&str, u64)]) -> Values {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_owned(), Value::UInt(*value)))
        .collect()
}

/// Wrap with unsigned 3-bit encodings on every data port.
pub fn unsigned3(circuit: Circuit) -> DiscreteCirc {
    let inputs: Vec<String> = circuit.input_names().map(str::to_owned).collect();
    let outputs: Vec<String> = circuit
        .output_names()
        .filter(|name| *name != DEFAULT_VALID_ID)
        .map(str::to_owned)
        .collect();
    let mut builder = DiscreteCirc::builder(circuit);
    for name in inputs {
        builder = builder.input_encoding(name, Encoding::unsigned(3));
    }
    for name in outputs {
        builder = builder.output_encoding(name, Encoding::unsigned(3));
    }
    builder.build().expect("unsigned3")
}

/// 3-bit `z = x + 1`, valid when `x <= 2`.
pub fn incrementer() -> DiscreteCirc {
    let mut b = CircuitBuilder::new();
    let x = b.input("x", 3);
    let one = b.uint(3, 1);
    let two = b.uint(3, 2);
    let z = b.add(&x, &one);
    let ok = b.ule(&x, &two);
    b.output("z", &z);
    b.output(DEFAULT_VALID_ID, &ok);
    unsigned3(b.build().expect("incrementer"))
}

/// Copies `x` to `out`, valid when `x < bound`.
pub fn below(out: &str, bound: u64) -> DiscreteCirc {
    let mut b = CircuitBuilder::new();
    let x = b.input("x", 3);
    let k = b.uint(3, bound);
    let ok = b.ult(&x, &k);
    b.output(out, &x);
    b.output(DEFAULT_VALID_ID, &ok);
    unsigned3(b.build().expect("below"))
}

/// Copies `x` to `out`, valid when `x > bound`.
pub fn above(out: &str, bound: u64) -> DiscreteCirc {
    let mut b = CircuitBuilder::new();
    let x = b.input("x", 3);
    let k = b.uint(3, bound);
    let ok = b.ugt(&x, &k);
    b.output(out, &x);
    b.output(DEFAULT_VALID_ID, &ok);
    unsigned3(b.build().expect("above"))
}

/// Reads `z` and reports it as `total`, valid when `z < 7`.
pub fn overflow_check() -> DiscreteCirc {
    let mut b = CircuitBuilder::new();
    let z = b.input("z", 3);
    let seven = b.uint(3, 7);
    let ok = b.ult(&z, &seven);
    b.output("total", &z);
    b.output(DEFAULT_VALID_ID, &ok);
    unsigned3(b.build().expect("overflow_check"))
}

/// 3-bit `z = x + y` with `y` fed back from `z`, valid when `x < 7`,
/// followed by [`overflow_check`].
pub fn accumulator() -> DiscreteCirc {
    let mut b = CircuitBuilder::new();
    let x = b.input("x", 3);
    let y = b.input("y", 3);
    let seven = b.uint(3, 7);
    let z = b.add(&x, &y);
    let ok = b.ult(&x, &seven);
    b.output("z", &z);
    b.output(DEFAULT_VALID_ID, &ok);
    let adder = unsigned3(b.build().expect("adder"));
    let acc = adder.loopback(&[Wiring::new("y", "z")]).expect("loopback");
    (&acc >> &overflow_check()).expect("accumulator")
}
