#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use dcirc_core::{
    CircuitBuilder, CircuitError, DEFAULT_VALID_ID, DiscreteCirc, DiscreteError, Encoding,
    EncodingError, EncodingTable, Value, Word,
};

mod common;
use common::*;

#[test]
fn test_incrementer_accepts_and_rejects() {
    init_test_logger();
    let incr = incrementer();

    let (outputs, latches) = incr.evaluate(&uints(&[("x", 2)]), None).unwrap();
    assert_eq!(outputs, uints(&[("z", 3)]));
    assert!(latches.is_empty());

    let inputs = uints(&[("x", 3)]);
    assert_eq!(
        incr.evaluate(&inputs, None).unwrap_err(),
        DiscreteError::InvalidInput { inputs }
    );
}

#[test]
fn test_circuit_without_validity_accepts_everything() {
    let mut b = CircuitBuilder::new();
    let x = b.input("x", 2);
    let y = b.input("y", 2);
    let s = b.xor(&x, &y);
    b.output("s", &s);
    let circ = DiscreteCirc::try_from(b.build().unwrap()).unwrap();

    for x in 0..4 {
        for y in 0..4 {
            let inputs = values(&[
                ("x", Value::Word(Word::from_uint(2, x))),
                ("y", Value::Word(Word::from_uint(2, y))),
            ]);
            let (outputs, _) = circ.evaluate(&inputs, None).unwrap();
            assert_eq!(outputs["s"], Value::Word(Word::from_uint(2, x ^ y)));
        }
    }
}

#[test]
fn test_validity_hidden_from_outputs() {
    let incr = incrementer();
    assert_eq!(incr.valid_id(), DEFAULT_VALID_ID);
    assert_eq!(incr.outputs().collect::<Vec<_>>(), vec![("z", 3)]);
    assert_eq!(incr.inputs().collect::<Vec<_>>(), vec![("x", 3)]);
    assert_eq!(incr.input_width("x"), Some(3));
    assert_eq!(incr.output_width("z"), Some(3));
    let (outputs, _) = incr.evaluate(&uints(&[("x", 0)]), None).unwrap();
    assert!(!outputs.contains_key(DEFAULT_VALID_ID));
}

#[test]
fn test_encodings_are_projected() {
    let mut b = CircuitBuilder::new();
    let x = b.input("x", 3);
    b.output("z", &x);
    let circ = DiscreteCirc::builder(b.build().unwrap())
        .input_encodings(
            EncodingTable::new()
                .with("x", Encoding::unsigned(3))
                .with("ghost", Encoding::boolean()),
        )
        .output_encoding("z", Encoding::unsigned(3))
        .output_encoding(DEFAULT_VALID_ID, Encoding::boolean())
        .build()
        .unwrap();
    assert!(circ.input_encodings().contains("x"));
    assert!(!circ.input_encodings().contains("ghost"));
    assert!(circ.output_encodings().contains("z"));
    assert!(!circ.output_encodings().contains(DEFAULT_VALID_ID));
}

#[test]
fn test_custom_validity_name() {
    let mut b = CircuitBuilder::new();
    let x = b.input("x", 3);
    let zero = b.uint(3, 0);
    let ok = b.eq(&x, &zero);
    b.output("ok", &ok);
    b.output("y", &x);
    let circ = DiscreteCirc::builder(b.build().unwrap())
        .valid_id("ok")
        .build()
        .unwrap();
    assert_eq!(circ.outputs().collect::<Vec<_>>(), vec![("y", 3)]);

    let zero = values(&[("x", Value::Word(Word::zeros(3)))]);
    assert!(circ.evaluate(&zero, None).is_ok());
    let one = values(&[("x", Value::Word(Word::from_uint(3, 1)))]);
    assert!(matches!(
        circ.evaluate(&one, None),
        Err(DiscreteError::InvalidInput { .. })
    ));
}

#[test]
fn test_wide_validity_output_is_configuration_error() {
    let mut b = CircuitBuilder::new();
    let x = b.input("x", 3);
    b.output("x_out", &x);
    let result = DiscreteCirc::builder(b.build().unwrap())
        .valid_id("x_out")
        .build();
    assert!(matches!(result, Err(DiscreteError::Configuration(_))));
}

#[test]
fn test_encoding_failures_name_the_port() {
    let incr = incrementer();
    assert_eq!(
        incr.evaluate(&uints(&[("x", 9)]), None).unwrap_err(),
        DiscreteError::Encoding {
            port: "x".to_owned(),
            source: EncodingError::OutOfRange {
                value: Value::UInt(9),
                width: 3
            }
        }
    );
    assert!(matches!(
        incr.evaluate(&values(&[("x", Value::from("two"))]), None),
        Err(DiscreteError::Encoding { .. })
    ));
}

#[test]
fn test_circuit_errors_surface() {
    let incr = incrementer();
    assert_eq!(
        incr.evaluate(&uints(&[]), None).unwrap_err(),
        DiscreteError::Circuit(CircuitError::MissingInput("x".to_owned()))
    );
}

#[test]
fn test_rename_valid() {
    let incr = incrementer();
    assert_eq!(
        incr.rename_valid("z").unwrap_err(),
        DiscreteError::NameConflict("z".to_owned())
    );

    let renamed = incr.rename_valid("ok").unwrap();
    assert_eq!(renamed.valid_id(), "ok");
    assert_eq!(renamed.outputs().collect::<Vec<_>>(), vec![("z", 3)]);
    assert!(renamed.output_encodings().get("z").same_as(incr.output_encodings().get("z")));
    assert!(matches!(
        renamed.evaluate(&uints(&[("x", 5)]), None),
        Err(DiscreteError::InvalidInput { .. })
    ));
}

#[test]
fn test_simulate_stops_at_first_invalid_step() {
    init_test_logger();
    let acc = accumulator();
    let steps = vec![uints(&[("x", 1)]); 3];
    let trace = acc.simulate(&steps, None).unwrap();
    let totals: Vec<_> = trace.iter().map(|outputs| outputs["total"].clone()).collect();
    assert_eq!(totals, vec![Value::UInt(1), Value::UInt(2), Value::UInt(3)]);

    let steps = vec![uints(&[("x", 1)]); 10];
    assert_eq!(
        acc.simulate(&steps, None).unwrap_err(),
        DiscreteError::InvalidInput {
            inputs: uints(&[("x", 1)])
        }
    );
}

#[test]
fn test_simulate_threads_latch_state() {
    let acc = accumulator();
    let trace = acc.simulate(&[uints(&[("x", 1)]), uints(&[("x", 1)])], None).unwrap();
    assert_eq!(trace, vec![uints(&[("total", 1)]), uints(&[("total", 2)])]);
    assert!(acc.simulate(&[], None).unwrap().is_empty());
}

#[test]
fn test_simulate_reports_the_rejected_step() {
    // totals 3, 6, then 7 fails the downstream check; the last step is
    // missing x and must never be evaluated
    let acc = accumulator();
    let steps = vec![
        uints(&[("x", 3)]),
        uints(&[("x", 3)]),
        uints(&[("x", 1)]),
        uints(&[]),
    ];
    assert_eq!(
        acc.simulate(&steps, None).unwrap_err(),
        DiscreteError::InvalidInput {
            inputs: uints(&[("x", 1)])
        }
    );
    assert_eq!(acc.simulate(&steps[..2], None).unwrap().len(), 2);
}
