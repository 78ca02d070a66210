#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use dcirc_core::{DiscreteCirc, DiscreteError, PortKind, UnrollOptions, Value, Values, timed_name};
use indexmap::IndexMap;
use quickcheck::quickcheck;

mod common;
use common::*;

fn verdict(circ: &DiscreteCirc, inputs: &Values) -> bool {
    match circ.evaluate(inputs, None) {
        Ok(_) => true,
        Err(DiscreteError::InvalidInput { .. }) => false,
        Err(other) => panic!("unexpected error: {other}"),
    }
}

quickcheck! {
    fn prop_parallel_is_conjunction(x: u8, lo: u8, hi: u8) -> bool {
        let (x, lo, hi) = (u64::from(x % 8), u64::from(lo % 8), u64::from(hi % 8));
        let left = below("l", lo);
        let right = above("r", hi);
        let both = left.parallel(&right).unwrap();
        let inputs = uints(&[("x", x)]);
        verdict(&both, &inputs) == (verdict(&left, &inputs) && verdict(&right, &inputs))
    }

    fn prop_relabel_preserves_validity(x: u8) -> bool {
        let incr = incrementer();
        let renames: IndexMap<String, String> =
            [("x".to_owned(), "a".to_owned())].into_iter().collect();
        let relabeled = incr.relabel(PortKind::Input, &renames).unwrap();
        let x = u64::from(x % 8);
        verdict(&incr, &uints(&[("x", x)])) == verdict(&relabeled, &uints(&[("a", x)]))
    }

    fn prop_unroll_accepts_iff_every_step_valid(xs: Vec<u8>) -> bool {
        let xs: Vec<u64> = xs.into_iter().take(4).map(|x| u64::from(x % 8)).collect();
        if xs.is_empty() {
            return true;
        }
        let incr = incrementer();
        let options = UnrollOptions::new().with_only_last_outputs(true);
        let unrolled = incr.unroll(xs.len(), &options).unwrap();
        let inputs: Values = xs
            .iter()
            .enumerate()
            .map(|(t, x)| (timed_name("x", t), Value::UInt(*x)))
            .collect();
        let every_step = xs.iter().all(|x| verdict(&incr, &uints(&[("x", *x)])));
        verdict(&unrolled, &inputs) == every_step
    }
}
