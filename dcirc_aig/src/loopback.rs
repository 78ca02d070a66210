//! Feedback wiring: turning output/input pairs into latches.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::circuit::{Latch, check_width};
use crate::{Circuit, CircuitError, PortKind, Word};

/// One feedback connection from an output back to an input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wiring {
    /// Input port that will read the latch.
    pub input: String,
    /// Output port that drives the latch.
    pub output: String,
    /// Latch name; defaults to the input name.
    #[serde(default)]
    pub latch: Option<String>,
    /// Initial latch value; defaults to all zeros.
    #[serde(default)]
    pub init: Option<Word>,
    /// Whether the output stays visible after wiring.
    #[serde(default = "keep_output_default")]
    pub keep_output: bool,
}

const fn keep_output_default() -> bool {
    true
}

impl Wiring {
    /// Feed `output` back into `input`, keeping the output visible.
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            latch: None,
            init: None,
            keep_output: true,
        }
    }

    /// Use `init` as the latch's initial value.
    #[must_use]
    pub fn with_init(mut self, init: Word) -> Self {
        self.init = Some(init);
        self
    }

    /// Name the latch explicitly.
    #[must_use]
    pub fn with_latch(mut self, latch: impl Into<String>) -> Self {
        self.latch = Some(latch.into());
        self
    }

    /// Choose whether the output stays visible.
    #[must_use]
    pub const fn keep_output(mut self, keep: bool) -> Self {
        self.keep_output = keep;
        self
    }

    /// Name of the latch this wiring creates.
    #[must_use]
    pub fn latch_name(&self) -> &str {
        self.latch.as_deref().unwrap_or(&self.input)
    }
}

impl Circuit {
    /// Replace each wiring's input by a latch fed from its output.
    ///
    /// # Errors
    ///
    /// [`CircuitError::UnknownPort`] when a named input or output is absent,
    /// [`CircuitError::WidthMismatch`] when the pair or the initial value
    /// disagree on width, [`CircuitError::DuplicatePort`] when the latch name
    /// is taken.
    pub fn loopback(&self, wirings: &[Wiring]) -> Result<Self, CircuitError> {
        let mut circuit = self.clone();
        for wiring in wirings {
            let next = circuit
                .outputs
                .get(&wiring.output)
                .cloned()
                .ok_or_else(|| CircuitError::UnknownPort {
                    kind: PortKind::Output,
                    name: wiring.output.clone(),
                })?;
            let state = circuit
                .inputs
                .shift_remove(&wiring.input)
                .ok_or_else(|| CircuitError::UnknownPort {
                    kind: PortKind::Input,
                    name: wiring.input.clone(),
                })?;
            check_width(PortKind::Output, &wiring.output, state.width(), next.width())?;

            let name = wiring.latch_name().to_owned();
            let init = wiring
                .init
                .clone()
                .unwrap_or_else(|| Word::zeros(state.width()));
            check_width(PortKind::Latch, &name, state.width(), init.width())?;
            if circuit.latches.contains_key(&name) {
                return Err(CircuitError::DuplicatePort {
                    kind: PortKind::Latch,
                    name,
                });
            }

            debug!(input = %wiring.input, output = %wiring.output, latch = %name, "loopback");
            circuit.latches.insert(name, Latch { state, next, init });
            if !wiring.keep_output {
                circuit.outputs.shift_remove(&wiring.output);
            }
        }
        Ok(circuit)
    }
}
