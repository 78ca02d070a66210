//! Named-port circuits and their combinational algebra.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::trace;

use crate::aig::{Aig, lit_value};
use crate::{Assignment, Bus, CircuitError, PortKind, Word};

/// A state element: current-state leaves, next-state function and reset value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Latch {
    pub(crate) state: Bus,
    pub(crate) next: Bus,
    pub(crate) init: Word,
}

impl Latch {
    /// Width in bits.
    #[must_use]
    pub fn width(&self) -> usize {
        self.state.width()
    }

    /// Value the latch holds before the first step.
    #[must_use]
    pub const fn init(&self) -> &Word {
        &self.init
    }

    fn translate(&self, map: &[crate::Lit]) -> Self {
        Self {
            state: self.state.translate(map),
            next: self.next.translate(map),
            init: self.init.clone(),
        }
    }
}

/// A bit-vector circuit with named inputs, outputs and latches.
///
/// Port maps keep declaration order, so iteration over ports is
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    pub(crate) aig: Aig,
    pub(crate) inputs: IndexMap<String, Bus>,
    pub(crate) outputs: IndexMap<String, Bus>,
    pub(crate) latches: IndexMap<String, Latch>,
}

impl Circuit {
    /// A circuit with a single constant output and no inputs.
    pub fn source(name: impl Into<String>, word: &Word) -> Self {
        let mut circuit = Self::default();
        circuit.outputs.insert(name.into(), Bus::constant(word));
        circuit
    }

    /// Input names and widths, in declaration order.
    pub fn inputs(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.inputs.iter().map(|(name, bus)| (name.as_str(), bus.width()))
    }

    /// Output names and widths, in declaration order.
    pub fn outputs(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.outputs.iter().map(|(name, bus)| (name.as_str(), bus.width()))
    }

    /// Latch names and widths, in declaration order.
    pub fn latches(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.latches.iter().map(|(name, latch)| (name.as_str(), latch.width()))
    }

    /// Latch names and their initial values.
    pub fn latch_inits(&self) -> impl Iterator<Item = (&str, &Word)> + '_ {
        self.latches.iter().map(|(name, latch)| (name.as_str(), &latch.init))
    }

    /// Input names.
    pub fn input_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.inputs.keys().map(String::as_str)
    }

    /// Output names.
    pub fn output_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.outputs.keys().map(String::as_str)
    }

    /// Latch names.
    pub fn latch_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.latches.keys().map(String::as_str)
    }

    /// Width of input `name`.
    #[must_use]
    pub fn input_width(&self, name: &str) -> Option<usize> {
        self.inputs.get(name).map(Bus::width)
    }

    /// Width of output `name`.
    #[must_use]
    pub fn output_width(&self, name: &str) -> Option<usize> {
        self.outputs.get(name).map(Bus::width)
    }

    /// Whether the circuit declares input `name`.
    #[must_use]
    pub fn has_input(&self, name: &str) -> bool {
        self.inputs.contains_key(name)
    }

    /// Whether the circuit declares output `name`.
    #[must_use]
    pub fn has_output(&self, name: &str) -> bool {
        self.outputs.contains_key(name)
    }

    /// The latch called `name`.
    #[must_use]
    pub fn latch(&self, name: &str) -> Option<&Latch> {
        self.latches.get(name)
    }

    /// Number of graph nodes backing the circuit.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.aig.node_count()
    }

    /// Place two circuits side by side.
    ///
    /// Inputs with the same name are shared and must agree on width. Output
    /// and latch names must be disjoint.
    ///
    /// # Errors
    ///
    /// [`CircuitError::WidthMismatch`] for a shared input of different widths,
    /// [`CircuitError::DuplicatePort`] for clashing outputs or latches.
    pub fn parallel(&self, other: &Self) -> Result<Self, CircuitError> {
        let mut aig = self.aig.clone();
        let mut subst = HashMap::new();
        let mut fresh_inputs = Vec::new();
        for (name, bus) in &other.inputs {
            match self.inputs.get(name) {
                Some(shared) => {
                    check_width(PortKind::Input, name, shared.width(), bus.width())?;
                    bind(&mut subst, bus, shared);
                }
                None => fresh_inputs.push((name, bus)),
            }
        }

        let map = aig.import(&other.aig, &subst);
        let mut inputs = self.inputs.clone();
        for (name, bus) in fresh_inputs {
            inputs.insert(name.clone(), bus.translate(&map));
        }
        let mut outputs = self.outputs.clone();
        for (name, bus) in &other.outputs {
            insert_unique(&mut outputs, PortKind::Output, name.clone(), bus.translate(&map))?;
        }
        let latches = merge_latches(&self.latches, &other.latches, &map)?;

        trace!(
            inputs = inputs.len(),
            outputs = outputs.len(),
            "parallel composition"
        );
        Ok(Self { aig, inputs, outputs, latches })
    }

    /// Feed this circuit's outputs into `other`'s inputs of the same name.
    ///
    /// Connected outputs are consumed. `other`'s remaining inputs are shared
    /// with this circuit's inputs of the same name, otherwise they become new
    /// inputs.
    ///
    /// # Errors
    ///
    /// [`CircuitError::WidthMismatch`] when a connection or a shared input
    /// disagrees on width, [`CircuitError::DuplicatePort`] for clashing
    /// outputs or latches.
    pub fn then(&self, other: &Self) -> Result<Self, CircuitError> {
        let mut aig = self.aig.clone();
        let mut subst = HashMap::new();
        let mut outputs = self.outputs.clone();
        let mut fresh_inputs = Vec::new();
        for (name, bus) in &other.inputs {
            if let Some(driver) = self.outputs.get(name) {
                check_width(PortKind::Input, name, driver.width(), bus.width())?;
                bind(&mut subst, bus, driver);
                outputs.shift_remove(name);
            } else if let Some(shared) = self.inputs.get(name) {
                check_width(PortKind::Input, name, shared.width(), bus.width())?;
                bind(&mut subst, bus, shared);
            } else {
                fresh_inputs.push((name, bus));
            }
        }

        let map = aig.import(&other.aig, &subst);
        let mut inputs = self.inputs.clone();
        for (name, bus) in fresh_inputs {
            inputs.insert(name.clone(), bus.translate(&map));
        }
        for (name, bus) in &other.outputs {
            insert_unique(&mut outputs, PortKind::Output, name.clone(), bus.translate(&map))?;
        }
        let latches = merge_latches(&self.latches, &other.latches, &map)?;

        trace!(
            inputs = inputs.len(),
            outputs = outputs.len(),
            "sequential composition"
        );
        Ok(Self { aig, inputs, outputs, latches })
    }

    /// Rename ports of one kind. Renames are applied simultaneously, so two
    /// ports may swap names.
    ///
    /// # Errors
    ///
    /// [`CircuitError::UnknownPort`] when a source name is not declared,
    /// [`CircuitError::DuplicatePort`] when two ports would share a name.
    pub fn relabel(
        &self,
        kind: PortKind,
        renames: &IndexMap<String, String>,
    ) -> Result<Self, CircuitError> {
        let mut circuit = self.clone();
        match kind {
            PortKind::Input => circuit.inputs = relabel_map(kind, &self.inputs, renames)?,
            PortKind::Output => circuit.outputs = relabel_map(kind, &self.outputs, renames)?,
            PortKind::Latch => circuit.latches = relabel_map(kind, &self.latches, renames)?,
        }
        Ok(circuit)
    }

    /// Drop outputs.
    ///
    /// # Errors
    ///
    /// [`CircuitError::UnknownPort`] when a name is not an output.
    pub fn sink<I, S>(&self, names: I) -> Result<Self, CircuitError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut circuit = self.clone();
        for name in names {
            let name = name.as_ref();
            if circuit.outputs.shift_remove(name).is_none() {
                return Err(CircuitError::UnknownPort {
                    kind: PortKind::Output,
                    name: name.to_owned(),
                });
            }
        }
        Ok(circuit)
    }

    /// Run one step.
    ///
    /// `latches` may be partial; latches it does not mention start from
    /// their initial value. Returns the outputs and the next latch state.
    ///
    /// # Errors
    ///
    /// [`CircuitError::MissingInput`] for an unassigned input,
    /// [`CircuitError::UnknownPort`] for an assignment to an undeclared name,
    /// [`CircuitError::WidthMismatch`] for a value of the wrong width.
    pub fn evaluate(
        &self,
        inputs: &Assignment,
        latches: Option<&Assignment>,
    ) -> Result<(Assignment, Assignment), CircuitError> {
        if let Some(name) = inputs.keys().find(|name| !self.inputs.contains_key(*name)) {
            return Err(CircuitError::UnknownPort {
                kind: PortKind::Input,
                name: name.clone(),
            });
        }
        if let Some(name) = latches
            .into_iter()
            .flat_map(|state| state.keys())
            .find(|name| !self.latches.contains_key(*name))
        {
            return Err(CircuitError::UnknownPort {
                kind: PortKind::Latch,
                name: name.clone(),
            });
        }

        let mut leaves = HashMap::new();
        for (name, bus) in &self.inputs {
            let word = inputs
                .get(name)
                .ok_or_else(|| CircuitError::MissingInput(name.clone()))?;
            check_width(PortKind::Input, name, bus.width(), word.width())?;
            assign(&mut leaves, bus, word);
        }
        for (name, latch) in &self.latches {
            let word = latches
                .and_then(|state| state.get(name))
                .unwrap_or(&latch.init);
            check_width(PortKind::Latch, name, latch.width(), word.width())?;
            assign(&mut leaves, &latch.state, word);
        }

        let values = self.aig.evaluate(&leaves);
        let read = |bus: &Bus| Word::from_bits(bus.iter().map(|lit| lit_value(&values, lit)));
        let outputs = self
            .outputs
            .iter()
            .map(|(name, bus)| (name.clone(), read(bus)))
            .collect();
        let next = self
            .latches
            .iter()
            .map(|(name, latch)| (name.clone(), read(&latch.next)))
            .collect();
        Ok((outputs, next))
    }
}

pub(crate) fn check_width(
    kind: PortKind,
    name: &str,
    expected: usize,
    found: usize,
) -> Result<(), CircuitError> {
    if expected == found {
        Ok(())
    } else {
        Err(CircuitError::WidthMismatch {
            kind,
            name: name.to_owned(),
            expected,
            found,
        })
    }
}

pub(crate) fn insert_unique<T>(
    map: &mut IndexMap<String, T>,
    kind: PortKind,
    name: String,
    value: T,
) -> Result<(), CircuitError> {
    if map.contains_key(&name) {
        return Err(CircuitError::DuplicatePort { kind, name });
    }
    map.insert(name, value);
    Ok(())
}

/// Record that the leaves of `from` are to be replaced by the bits of `to`.
pub(crate) fn bind(subst: &mut HashMap<u32, crate::Lit>, from: &Bus, to: &Bus) {
    for (leaf, lit) in from.iter().zip(to.iter()) {
        subst.insert(leaf.var(), lit.negate_if(leaf.is_negated()));
    }
}

fn assign(leaves: &mut HashMap<u32, bool>, bus: &Bus, word: &Word) {
    for (lit, &bit) in bus.iter().zip(word.bits()) {
        leaves.insert(lit.var(), bit ^ lit.is_negated());
    }
}

fn merge_latches(
    left: &IndexMap<String, Latch>,
    right: &IndexMap<String, Latch>,
    map: &[crate::Lit],
) -> Result<IndexMap<String, Latch>, CircuitError> {
    let mut latches = left.clone();
    for (name, latch) in right {
        insert_unique(&mut latches, PortKind::Latch, name.clone(), latch.translate(map))?;
    }
    Ok(latches)
}

fn relabel_map<T: Clone>(
    kind: PortKind,
    ports: &IndexMap<String, T>,
    renames: &IndexMap<String, String>,
) -> Result<IndexMap<String, T>, CircuitError> {
    if let Some(name) = renames.keys().find(|name| !ports.contains_key(*name)) {
        return Err(CircuitError::UnknownPort {
            kind,
            name: name.clone(),
        });
    }
    let mut relabeled = IndexMap::with_capacity(ports.len());
    for (name, value) in ports {
        let target = renames.get(name).unwrap_or(name);
        insert_unique(&mut relabeled, kind, target.clone(), value.clone())?;
    }
    Ok(relabeled)
}
