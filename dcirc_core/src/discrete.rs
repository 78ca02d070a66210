//! Circuits decorated with encodings and a validity output.

use std::sync::Arc;

use dcirc_aig::{Assignment, Circuit, PortKind, Word};
use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::{
    DEFAULT_VALID_ID, DiscreteError, Encoding, EncodingTable, Values, fresh_name,
};

/// A circuit whose single-bit output `valid_id` says whether the current
/// assignment is acceptable, together with encodings for its ports.
///
/// Values are immutable; every operation returns a new circuit. The
/// validity output is hidden from [`DiscreteCirc::outputs`] and from
/// evaluation results.
#[derive(Debug, Clone)]
pub struct DiscreteCirc {
    circuit: Arc<Circuit>,
    input_encodings: EncodingTable,
    output_encodings: EncodingTable,
    valid_id: String,
}

/// Fluent construction of a [`DiscreteCirc`].
///
/// ```ignore
/// let circ = DiscreteCirc::builder(circuit)
///     .input_encoding("x", Encoding::unsigned(3))
///     .output_encoding("z", Encoding::unsigned(3))
///     .valid_id("ok")
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct DiscreteCircBuilder {
    circuit: Circuit,
    input_encodings: EncodingTable,
    output_encodings: EncodingTable,
    valid_id: String,
}

impl DiscreteCircBuilder {
    /// Attach an encoding to an input.
    #[must_use]
    pub fn input_encoding(mut self, name: impl Into<String>, encoding: Encoding) -> Self {
        self.input_encodings = self.input_encodings.with(name, encoding);
        self
    }

    /// Attach an encoding to an output.
    #[must_use]
    pub fn output_encoding(mut self, name: impl Into<String>, encoding: Encoding) -> Self {
        self.output_encodings = self.output_encodings.with(name, encoding);
        self
    }

    /// Replace the whole input table.
    #[must_use]
    pub fn input_encodings(mut self, table: EncodingTable) -> Self {
        self.input_encodings = table;
        self
    }

    /// Replace the whole output table.
    #[must_use]
    pub fn output_encodings(mut self, table: EncodingTable) -> Self {
        self.output_encodings = table;
        self
    }

    /// Use `name` as the validity output.
    #[must_use]
    pub fn valid_id(mut self, name: impl Into<String>) -> Self {
        self.valid_id = name.into();
        self
    }

    /// Wrap the circuit.
    ///
    /// # Errors
    ///
    /// See [`DiscreteCirc::wrap`].
    pub fn build(self) -> Result<DiscreteCirc, DiscreteError> {
        DiscreteCirc::wrap(
            self.circuit,
            self.input_encodings,
            self.output_encodings,
            &self.valid_id,
        )
    }
}

impl DiscreteCirc {
    /// Decorate `circuit`.
    ///
    /// When `circuit` has no output called `valid_id`, a constant-true one
    /// is added, so every input is accepted. Encoding tables are trimmed to
    /// the circuit's ports.
    ///
    /// # Errors
    ///
    /// [`DiscreteError::Configuration`] when `valid_id` names an output wider
    /// than one bit.
    pub fn wrap(
        circuit: Circuit,
        input_encodings: EncodingTable,
        output_encodings: EncodingTable,
        valid_id: &str,
    ) -> Result<Self, DiscreteError> {
        let circuit = if circuit.has_output(valid_id) {
            circuit
        } else {
            debug!(valid_id, "adding constant-true validity output");
            circuit.parallel(&Circuit::source(valid_id, &Word::from_bool(true)))?
        };
        Self::from_parts(circuit, &input_encodings, &output_encodings, valid_id.to_owned())
    }

    /// Start a [`DiscreteCircBuilder`] with identity encodings and
    /// [`DEFAULT_VALID_ID`].
    #[must_use]
    pub fn builder(circuit: Circuit) -> DiscreteCircBuilder {
        DiscreteCircBuilder {
            circuit,
            input_encodings: EncodingTable::new(),
            output_encodings: EncodingTable::new(),
            valid_id: DEFAULT_VALID_ID.to_owned(),
        }
    }

    pub(crate) fn from_parts(
        circuit: Circuit,
        input_encodings: &EncodingTable,
        output_encodings: &EncodingTable,
        valid_id: String,
    ) -> Result<Self, DiscreteError> {
        match circuit.output_width(&valid_id) {
            Some(1) => {}
            Some(width) => {
                return Err(DiscreteError::Configuration(format!(
                    "validity output `{valid_id}` has width {width}, expected 1"
                )));
            }
            None => {
                return Err(DiscreteError::Configuration(format!(
                    "validity output `{valid_id}` is missing"
                )));
            }
        }

        let input_encodings = input_encodings.project(circuit.input_names());
        let output_encodings = output_encodings.project(
            circuit
                .output_names()
                .filter(|name| *name != valid_id.as_str()),
        );
        trace!(
            valid_id = %valid_id,
            inputs = circuit.inputs().count(),
            outputs = circuit.outputs().count(),
            latches = circuit.latches().count(),
            "validated circuit"
        );
        Ok(Self {
            circuit: Arc::new(circuit),
            input_encodings,
            output_encodings,
            valid_id,
        })
    }

    /// Give the validity output a new name.
    ///
    /// # Errors
    ///
    /// [`DiscreteError::NameConflict`] when another output already uses
    /// `name`.
    pub fn rename_valid(&self, name: &str) -> Result<Self, DiscreteError> {
        if name == self.valid_id {
            return Ok(self.clone());
        }
        if self.circuit.has_output(name) {
            return Err(DiscreteError::NameConflict(name.to_owned()));
        }
        let renames: IndexMap<String, String> =
            [(self.valid_id.clone(), name.to_owned())].into_iter().collect();
        let circuit = self.circuit.relabel(PortKind::Output, &renames)?;
        Ok(Self {
            circuit: Arc::new(circuit),
            input_encodings: self.input_encodings.clone(),
            output_encodings: self.output_encodings.clone(),
            valid_id: name.to_owned(),
        })
    }

    /// Give the validity output a generated name that nothing else uses.
    ///
    /// # Errors
    ///
    /// See [`DiscreteCirc::rename_valid`].
    pub fn rename_valid_fresh(&self) -> Result<Self, DiscreteError> {
        self.rename_valid(&fresh_name(DEFAULT_VALID_ID))
    }

    /// Run one step on application values.
    ///
    /// Inputs are encoded, the circuit is evaluated from `latches` (or the
    /// initial state), and the outputs are decoded. Returns the decoded
    /// outputs and the next latch state.
    ///
    /// # Errors
    ///
    /// [`DiscreteError::Encoding`] for a value its port cannot encode,
    /// [`DiscreteError::InvalidInput`] when the validity output is false,
    /// [`DiscreteError::Circuit`] for missing, unknown or mis-sized ports.
    pub fn evaluate(
        &self,
        inputs: &Values,
        latches: Option<&Assignment>,
    ) -> Result<(Values, Assignment), DiscreteError> {
        let mut wires = Assignment::with_capacity(inputs.len());
        for (name, value) in inputs {
            let word = self
                .input_encodings
                .get(name)
                .encode(value)
                .map_err(|source| DiscreteError::Encoding {
                    port: name.clone(),
                    source,
                })?;
            wires.insert(name.clone(), word);
        }

        let (mut outputs, next) = self.circuit.evaluate(&wires, latches)?;
        let valid = outputs
            .shift_remove(&self.valid_id)
            .and_then(|word| word.get(0))
            .unwrap_or(false);
        if !valid {
            trace!(valid_id = %self.valid_id, "assignment rejected");
            return Err(DiscreteError::InvalidInput {
                inputs: inputs.clone(),
            });
        }

        let decoded = outputs
            .iter()
            .map(|(name, word)| (name.clone(), self.output_encodings.get(name).decode(word)))
            .collect();
        Ok((decoded, next))
    }

    /// Evaluate a sequence of steps, threading latch state.
    ///
    /// # Errors
    ///
    /// The first step's error, as from [`DiscreteCirc::evaluate`].
    pub fn simulate(
        &self,
        steps: &[Values],
        latches: Option<&Assignment>,
    ) -> Result<Vec<Values>, DiscreteError> {
        let mut state = latches.cloned();
        let mut trace = Vec::with_capacity(steps.len());
        for inputs in steps {
            let (outputs, next) = self.evaluate(inputs, state.as_ref())?;
            trace.push(outputs);
            state = Some(next);
        }
        Ok(trace)
    }

    /// Input names and widths.
    pub fn inputs(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.circuit.inputs()
    }

    /// Output names and widths, without the validity output.
    pub fn outputs(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.circuit
            .outputs()
            .filter(|(name, _)| *name != self.valid_id)
    }

    /// Latch names and widths.
    pub fn latches(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.circuit.latches()
    }

    /// Latch names and initial values.
    pub fn latch_inits(&self) -> impl Iterator<Item = (&str, &Word)> + '_ {
        self.circuit.latch_inits()
    }

    /// Width of input `name`.
    #[must_use]
    pub fn input_width(&self, name: &str) -> Option<usize> {
        self.circuit.input_width(name)
    }

    /// Width of output `name`; `None` for the validity output.
    #[must_use]
    pub fn output_width(&self, name: &str) -> Option<usize> {
        if name == self.valid_id {
            None
        } else {
            self.circuit.output_width(name)
        }
    }

    /// Name of the validity output.
    #[must_use]
    pub fn valid_id(&self) -> &str {
        &self.valid_id
    }

    /// The underlying circuit, validity output included.
    #[must_use]
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Encodings of the inputs.
    #[must_use]
    pub const fn input_encodings(&self) -> &EncodingTable {
        &self.input_encodings
    }

    /// Encodings of the outputs.
    #[must_use]
    pub const fn output_encodings(&self) -> &EncodingTable {
        &self.output_encodings
    }
}

impl TryFrom<Circuit> for DiscreteCirc {
    type Error = DiscreteError;

    fn try_from(circuit: Circuit) -> Result<Self, Self::Error> {
        Self::builder(circuit).build()
    }
}
