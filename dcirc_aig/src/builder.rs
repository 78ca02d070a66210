//! Word-level construction of circuits.

use contracts::*;
use indexmap::IndexMap;

use crate::aig::Aig;
use crate::circuit::{Latch, check_width};
use crate::{Bus, Circuit, CircuitError, Lit, PortKind, Word};

#[derive(Debug)]
struct PendingLatch {
    state: Bus,
    next: Option<Bus>,
    init: Word,
}

/// Incrementally assembles a [`Circuit`].
///
/// Operand widths are preconditions and panic when violated. Naming
/// problems (duplicate outputs, unknown latches) are recorded and reported
/// by [`CircuitBuilder::build`].
#[derive(Debug, Default)]
pub struct CircuitBuilder {
    aig: Aig,
    inputs: IndexMap<String, Bus>,
    outputs: IndexMap<String, Bus>,
    latches: IndexMap<String, PendingLatch>,
    error: Option<CircuitError>,
}

impl CircuitBuilder {
    /// An empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(&mut self, error: CircuitError) {
        self.error.get_or_insert(error);
    }

    /// Declare an input, or return the existing one with the same name.
    pub fn input(&mut self, name: &str, width: usize) -> Bus {
        if let Some(bus) = self.inputs.get(name) {
            let bus = bus.clone();
            if let Err(error) = check_width(PortKind::Input, name, width, bus.width()) {
                self.fail(error);
            }
            return bus;
        }
        let bus = Bus::new(self.aig.leaves(width));
        self.inputs.insert(name.to_owned(), bus.clone());
        bus
    }

    /// Declare a latch starting at `init`. Returns its current-state bus;
    /// the next state is given later with [`CircuitBuilder::set_next`].
    pub fn latch(&mut self, name: &str, init: &Word) -> Bus {
        let state = Bus::new(self.aig.leaves(init.width()));
        if self.latches.contains_key(name) {
            self.fail(CircuitError::DuplicatePort {
                kind: PortKind::Latch,
                name: name.to_owned(),
            });
            return state;
        }
        self.latches.insert(
            name.to_owned(),
            PendingLatch {
                state: state.clone(),
                next: None,
                init: init.clone(),
            },
        );
        state
    }

    /// Drive the next state of latch `name`.
    pub fn set_next(&mut self, name: &str, next: &Bus) {
        let Some(latch) = self.latches.get_mut(name) else {
            self.fail(CircuitError::UnknownPort {
                kind: PortKind::Latch,
                name: name.to_owned(),
            });
            return;
        };
        match check_width(PortKind::Latch, name, latch.state.width(), next.width()) {
            Ok(()) => latch.next = Some(next.clone()),
            Err(error) => self.fail(error),
        }
    }

    /// Expose `bus` as output `name`.
    pub fn output(&mut self, name: &str, bus: &Bus) {
        if self.outputs.contains_key(name) {
            self.fail(CircuitError::DuplicatePort {
                kind: PortKind::Output,
                name: name.to_owned(),
            });
            return;
        }
        self.outputs.insert(name.to_owned(), bus.clone());
    }

    /// A constant bus.
    #[must_use]
    pub fn constant(&self, word: &Word) -> Bus {
        Bus::constant(word)
    }

    /// An unsigned constant bus.
    #[requires(width <= 64)]
    #[must_use]
    pub fn uint(&self, width: usize, value: u64) -> Bus {
        Bus::constant(&Word::from_uint(width, value))
    }

    /// Bitwise complement.
    #[must_use]
    pub fn not(&self, a: &Bus) -> Bus {
        a.complement()
    }

    /// Bitwise AND.
    #[requires(a.width() == b.width(), "operands must have the same width")]
    pub fn and(&mut self, a: &Bus, b: &Bus) -> Bus {
        a.iter().zip(b.iter()).map(|(x, y)| self.aig.and(x, y)).collect()
    }

    /// Bitwise OR.
    #[requires(a.width() == b.width(), "operands must have the same width")]
    pub fn or(&mut self, a: &Bus, b: &Bus) -> Bus {
        a.iter().zip(b.iter()).map(|(x, y)| self.aig.or(x, y)).collect()
    }

    /// Bitwise XOR.
    #[requires(a.width() == b.width(), "operands must have the same width")]
    pub fn xor(&mut self, a: &Bus, b: &Bus) -> Bus {
        a.iter().zip(b.iter()).map(|(x, y)| self.aig.xor(x, y)).collect()
    }

    /// `sel ? then : otherwise`, with a single-bit selector.
    #[requires(sel.width() == 1, "selector must be a single bit")]
    #[requires(then.width() == otherwise.width(), "branches must have the same width")]
    pub fn mux(&mut self, sel: &Bus, then: &Bus, otherwise: &Bus) -> Bus {
        let sel = sel.bit(0).unwrap_or(Lit::FALSE);
        then.iter()
            .zip(otherwise.iter())
            .map(|(t, e)| self.aig.mux(sel, t, e))
            .collect()
    }

    /// AND of all bits; true for an empty bus.
    pub fn reduce_and(&mut self, a: &Bus) -> Bus {
        let lit = a.iter().fold(Lit::TRUE, |acc, bit| self.aig.and(acc, bit));
        Bus::from(lit)
    }

    /// OR of all bits; false for an empty bus.
    pub fn reduce_or(&mut self, a: &Bus) -> Bus {
        let lit = a.iter().fold(Lit::FALSE, |acc, bit| self.aig.or(acc, bit));
        Bus::from(lit)
    }

    fn add_with_carry(&mut self, a: &Bus, b: &Bus, carry_in: Lit) -> (Bus, Lit) {
        let mut carry = carry_in;
        let mut sum = Vec::with_capacity(a.width());
        for (x, y) in a.iter().zip(b.iter()) {
            let half = self.aig.xor(x, y);
            sum.push(self.aig.xor(half, carry));
            let generate = self.aig.and(x, y);
            let propagate = self.aig.and(half, carry);
            carry = self.aig.or(generate, propagate);
        }
        (Bus::new(sum), carry)
    }

    /// Wrapping addition.
    #[requires(a.width() == b.width(), "operands must have the same width")]
    pub fn add(&mut self, a: &Bus, b: &Bus) -> Bus {
        self.add_with_carry(a, b, Lit::FALSE).0
    }

    /// Wrapping subtraction.
    #[requires(a.width() == b.width(), "operands must have the same width")]
    pub fn sub(&mut self, a: &Bus, b: &Bus) -> Bus {
        self.add_with_carry(a, &b.complement(), Lit::TRUE).0
    }

    /// Equality, as a single bit.
    #[requires(a.width() == b.width(), "operands must have the same width")]
    pub fn eq(&mut self, a: &Bus, b: &Bus) -> Bus {
        let diff = self.xor(a, b);
        let any = self.reduce_or(&diff);
        any.complement()
    }

    /// Unsigned `a < b`, as a single bit.
    #[requires(a.width() == b.width(), "operands must have the same width")]
    pub fn ult(&mut self, a: &Bus, b: &Bus) -> Bus {
        // a - b borrows exactly when a < b
        let (_, carry) = self.add_with_carry(a, &b.complement(), Lit::TRUE);
        Bus::from(!carry)
    }

    /// Unsigned `a <= b`.
    #[requires(a.width() == b.width(), "operands must have the same width")]
    pub fn ule(&mut self, a: &Bus, b: &Bus) -> Bus {
        self.ult(b, a).complement()
    }

    /// Unsigned `a > b`.
    #[requires(a.width() == b.width(), "operands must have the same width")]
    pub fn ugt(&mut self, a: &Bus, b: &Bus) -> Bus {
        self.ult(b, a)
    }

    /// Unsigned `a >= b`.
    #[requires(a.width() == b.width(), "operands must have the same width")]
    pub fn uge(&mut self, a: &Bus, b: &Bus) -> Bus {
        self.ult(a, b).complement()
    }

    /// Finish the circuit.
    ///
    /// # Errors
    ///
    /// The first naming error recorded while building, or
    /// [`CircuitError::UndrivenLatch`] for a latch without a next state.
    pub fn build(self) -> Result<Circuit, CircuitError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let mut latches = IndexMap::with_capacity(self.latches.len());
        for (name, pending) in self.latches {
            let Some(next) = pending.next else {
                return Err(CircuitError::UndrivenLatch(name));
            };
            latches.insert(
                name,
                Latch {
                    state: pending.state,
                    next,
                    init: pending.init,
                },
            );
        }
        Ok(Circuit {
            aig: self.aig,
            inputs: self.inputs,
            outputs: self.outputs,
            latches,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Assignment;

    fn eval_binary(circuit: &Circuit, a: u64, b: u64, width: usize) -> u64 {
        let inputs: Assignment = [
            ("a".to_owned(), Word::from_uint(width, a)),
            ("b".to_owned(), Word::from_uint(width, b)),
        ]
        .into_iter()
        .collect();
        let (outputs, _) = circuit.evaluate(&inputs, None).unwrap();
        outputs["o"].to_uint()
    }

    fn binary(op: impl Fn(&mut CircuitBuilder, &Bus, &Bus) -> Bus) -> Circuit {
        let mut b = CircuitBuilder::new();
        let x = b.input("a", 3);
        let y = b.input("b", 3);
        let o = op(&mut b, &x, &y);
        b.output("o", &o);
        b.build().unwrap()
    }

    #[test]
    fn test_arithmetic_exhaustive() {
        let add = binary(CircuitBuilder::add);
        let sub = binary(CircuitBuilder::sub);
        let ult = binary(CircuitBuilder::ult);
        let ule = binary(CircuitBuilder::ule);
        let eq = binary(CircuitBuilder::eq);
        for a in 0..8 {
            for b in 0..8 {
                assert_eq!(eval_binary(&add, a, b, 3), (a + b) % 8);
                assert_eq!(eval_binary(&sub, a, b, 3), (a + 8 - b) % 8);
                assert_eq!(eval_binary(&ult, a, b, 3), u64::from(a < b));
                assert_eq!(eval_binary(&ule, a, b, 3), u64::from(a <= b));
                assert_eq!(eval_binary(&eq, a, b, 3), u64::from(a == b));
            }
        }
    }

    #[test]
    fn test_repeated_input_is_shared() {
        let mut b = CircuitBuilder::new();
        let first = b.input("x", 2);
        let second = b.input("x", 2);
        assert_eq!(first, second);
        b.output("y", &first);
        assert_eq!(b.build().unwrap().inputs().count(), 1);
    }

    #[test]
    fn test_duplicate_output_reported_at_build() {
        let mut b = CircuitBuilder::new();
        let x = b.input("x", 1);
        b.output("y", &x);
        b.output("y", &x);
        assert_eq!(
            b.build().unwrap_err(),
            CircuitError::DuplicatePort {
                kind: PortKind::Output,
                name: "y".to_owned()
            }
        );
    }

    #[test]
    fn test_undriven_latch_rejected() {
        let mut b = CircuitBuilder::new();
        let _ = b.latch("s", &Word::zeros(2));
        assert_eq!(
            b.build().unwrap_err(),
            CircuitError::UndrivenLatch("s".to_owned())
        );
    }

    #[test]
    #[should_panic]
    fn test_width_mismatch_panics() {
        let mut b = CircuitBuilder::new();
        let x = b.input("x", 2);
        let y = b.input("y", 3);
        let _ = b.add(&x, &y);
    }
}
