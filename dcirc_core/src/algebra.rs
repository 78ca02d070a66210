//! Composition of validated circuits.
//!
//! Every binary operation first moves both operands' validity outputs to
//! fresh names, composes the circuits, and then ANDs the two validity bits
//! into the left operand's validity name. Encodings follow the ports:
//!
//! | operation | input table | output table |
//! |---|---|---|
//! | `a \| b` | `a` wins | `a` wins |
//! | `a >> b` | `b` wins | `a` wins |
//!
//! In `a >> b` the connected names are dropped from `b`'s inputs and `a`'s
//! outputs before merging, so an exposed port always keeps the encoding of
//! the operand that exposes it.

use std::ops::{BitOr, Shl, Shr};

use dcirc_aig::{Circuit, CircuitBuilder, CircuitError, PortKind, Wiring};
use indexmap::IndexMap;
use itertools::Itertools;
use tracing::debug;

use crate::{DiscreteCirc, DiscreteError, EncodingTable};

/// `out = a & b` over single-bit ports.
fn both_valid(a: &str, b: &str, out: &str) -> Result<Circuit, CircuitError> {
    let mut builder = CircuitBuilder::new();
    let a = builder.input(a, 1);
    let b = builder.input(b, 1);
    let both = builder.and(&a, &b);
    builder.output(out, &both);
    builder.build()
}

impl DiscreteCirc {
    /// Run both circuits side by side on shared inputs. The result accepts
    /// an assignment when both operands accept it.
    ///
    /// # Errors
    ///
    /// [`DiscreteError::Circuit`] when shared inputs disagree on width or
    /// outputs clash.
    pub fn parallel(&self, other: &Self) -> Result<Self, DiscreteError> {
        let left = self.rename_valid_fresh()?;
        let right = other.rename_valid_fresh()?;
        let joined = left.circuit().parallel(right.circuit())?;
        let circuit = joined.then(&both_valid(
            left.valid_id(),
            right.valid_id(),
            self.valid_id(),
        )?)?;

        debug!(
            "[ALGEBRA] parallel: [{}] | [{}], {} inputs",
            self.outputs().map(|(name, _)| name).join(","),
            other.outputs().map(|(name, _)| name).join(","),
            circuit.inputs().count()
        );
        Self::from_parts(
            circuit,
            &self.input_encodings().merge(other.input_encodings()),
            &self.output_encodings().merge(other.output_encodings()),
            self.valid_id().to_owned(),
        )
    }

    /// Feed this circuit's outputs into `other`'s inputs of the same name.
    /// The result accepts an assignment when this circuit accepts it and
    /// `other` accepts what this circuit produces.
    ///
    /// # Errors
    ///
    /// [`DiscreteError::Circuit`] when a connection disagrees on width or
    /// outputs clash.
    pub fn then(&self, other: &Self) -> Result<Self, DiscreteError> {
        let left = self.rename_valid_fresh()?;
        let right = other.rename_valid_fresh()?;
        let chained = left.circuit().then(right.circuit())?;
        let circuit = chained.then(&both_valid(
            left.valid_id(),
            right.valid_id(),
            self.valid_id(),
        )?)?;

        let connected: Vec<&str> = self
            .outputs()
            .filter(|(name, _)| other.circuit().has_input(name))
            .map(|(name, _)| name)
            .collect();
        debug!("[ALGEBRA] sequential: connected {}", connected.iter().join(","));

        // connected ports are internal, so neither side's entry for them may
        // shadow an exposed port that reuses the name
        Self::from_parts(
            circuit,
            &other
                .input_encodings()
                .without(&connected)
                .merge(self.input_encodings()),
            &self
                .output_encodings()
                .without(&connected)
                .merge(other.output_encodings()),
            self.valid_id().to_owned(),
        )
    }

    /// `other.then(self)`.
    ///
    /// # Errors
    ///
    /// See [`DiscreteCirc::then`].
    pub fn after(&self, other: &Self) -> Result<Self, DiscreteError> {
        other.then(self)
    }

    /// Rename ports of one kind, carrying their encodings along.
    ///
    /// # Errors
    ///
    /// [`DiscreteError::ReservedName`] when an output rename touches the
    /// validity output, [`DiscreteError::Circuit`] for unknown or clashing
    /// names.
    pub fn relabel(
        &self,
        kind: PortKind,
        renames: &IndexMap<String, String>,
    ) -> Result<Self, DiscreteError> {
        if kind == PortKind::Output
            && renames
                .iter()
                .any(|(from, to)| *from == self.valid_id() || *to == self.valid_id())
        {
            return Err(DiscreteError::ReservedName(self.valid_id().to_owned()));
        }

        let circuit = self.circuit().relabel(kind, renames)?;
        let (inputs, outputs) = match kind {
            PortKind::Input => (
                self.input_encodings().rename(renames),
                self.output_encodings().clone(),
            ),
            PortKind::Output => (
                self.input_encodings().clone(),
                self.output_encodings().rename(renames),
            ),
            PortKind::Latch => (
                self.input_encodings().clone(),
                self.output_encodings().clone(),
            ),
        };
        Self::from_parts(circuit, &inputs, &outputs, self.valid_id().to_owned())
    }

    /// Turn output/input pairs into latches.
    ///
    /// Encodings of consumed inputs, and of outputs hidden by the wiring,
    /// are dropped.
    ///
    /// # Errors
    ///
    /// [`DiscreteError::Circuit`] for unknown ports or width mismatches,
    /// [`DiscreteError::Configuration`] when the wiring hides the validity
    /// output.
    pub fn loopback(&self, wirings: &[Wiring]) -> Result<Self, DiscreteError> {
        let circuit = self.circuit().loopback(wirings)?;
        debug!(
            "[ALGEBRA] loopback: {}",
            wirings
                .iter()
                .map(|w| format!("{} <- {}", w.input, w.output))
                .join(", ")
        );
        Self::from_parts(
            circuit,
            self.input_encodings(),
            self.output_encodings(),
            self.valid_id().to_owned(),
        )
    }

    /// Additionally require the single-bit output of `predicate` to hold.
    ///
    /// # Errors
    ///
    /// [`DiscreteError::Configuration`] unless `predicate` has exactly one
    /// output of width 1, otherwise as [`DiscreteCirc::parallel`].
    pub fn assume(&self, predicate: &Circuit) -> Result<Self, DiscreteError> {
        let outputs = predicate.outputs().collect::<Vec<_>>();
        let [(name, 1)] = outputs.as_slice() else {
            return Err(DiscreteError::Configuration(format!(
                "assumption must have exactly one 1-bit output, found [{}]",
                outputs
                    .iter()
                    .map(|(name, width)| format!("{name}: {width}"))
                    .join(", ")
            )));
        };
        let guard = Self::wrap(
            predicate.clone(),
            EncodingTable::new(),
            EncodingTable::new(),
            name,
        )?;
        self.parallel(&guard)
    }
}

impl BitOr for &DiscreteCirc {
    type Output = Result<DiscreteCirc, DiscreteError>;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.parallel(rhs)
    }
}

impl BitOr for DiscreteCirc {
    type Output = Result<Self, DiscreteError>;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.parallel(&rhs)
    }
}

impl Shr for &DiscreteCirc {
    type Output = Result<DiscreteCirc, DiscreteError>;

    fn shr(self, rhs: Self) -> Self::Output {
        self.then(rhs)
    }
}

impl Shr for DiscreteCirc {
    type Output = Result<Self, DiscreteError>;

    fn shr(self, rhs: Self) -> Self::Output {
        self.then(&rhs)
    }
}

impl Shl for &DiscreteCirc {
    type Output = Result<DiscreteCirc, DiscreteError>;

    fn shl(self, rhs: Self) -> Self::Output {
        self.after(rhs)
    }
}

impl Shl for DiscreteCirc {
    type Output = Result<Self, DiscreteError>;

    fn shl(self, rhs: Self) -> Self::Output {
        self.after(&rhs)
    }
}
