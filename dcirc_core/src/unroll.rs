//! Bounded unrolling with a historically-valid monitor.

use dcirc_aig::{Circuit, CircuitBuilder, CircuitError, UnrollOptions, Word, timed_name};
use tracing::debug;

use crate::{DiscreteCirc, DiscreteError, fresh_name};

/// `valid' = valid & hist`, where `hist` remembers whether every earlier
/// step was valid.
fn monitor(valid_id: &str, hist: &str) -> Result<Circuit, CircuitError> {
    let mut builder = CircuitBuilder::new();
    let valid = builder.input(valid_id, 1);
    let seen = builder.latch(hist, &Word::from_bool(true));
    let still = builder.and(&valid, &seen);
    builder.set_next(hist, &still);
    builder.output(valid_id, &still);
    builder.build()
}

impl DiscreteCirc {
    /// Expand into `horizon` combinational steps.
    ///
    /// Ports are copied per step as `<name>##time_<t>` (inputs for `t` in
    /// `0..horizon`, outputs for `t` in `1..=horizon`). The validity output
    /// of the result is `<valid_id>##time_<horizon>` and holds when every
    /// step was valid. Intermediate validity outputs are removed unless
    /// `options.only_last_outputs` already dropped them. Timed ports keep
    /// the encoding of their base port.
    ///
    /// # Errors
    ///
    /// [`DiscreteError::Configuration`] when the final validity output does
    /// not exist, in particular for `horizon == 0`.
    pub fn unroll(&self, horizon: usize, options: &UnrollOptions) -> Result<Self, DiscreteError> {
        let hist = fresh_name("##hist");
        let monitored = self.circuit().then(&monitor(self.valid_id(), &hist)?)?;
        let mut unrolled = monitored.unroll(horizon, options)?;

        if !options.init {
            // the monitor always starts from "valid so far"
            let start = Circuit::source(timed_name(&hist, 0), &Word::from_bool(true));
            unrolled = start.then(&unrolled)?;
        }

        let mut hidden = Vec::new();
        if !options.only_last_outputs {
            hidden.extend((1..horizon).map(|t| timed_name(self.valid_id(), t)));
        }
        if !options.omit_latches {
            hidden.extend(
                (1..=horizon)
                    .map(|t| timed_name(&hist, t))
                    .filter(|name| unrolled.has_output(name)),
            );
        }
        let unrolled = unrolled.sink(&hidden)?;

        let valid_id = timed_name(self.valid_id(), horizon);
        if !unrolled.has_output(&valid_id) {
            return Err(DiscreteError::Configuration(format!(
                "unrolled circuit has no validity output `{valid_id}`"
            )));
        }

        debug!(
            "[UNROLL] horizon {}: {} inputs, {} outputs, valid_id {}",
            horizon,
            unrolled.inputs().count(),
            unrolled.outputs().count(),
            valid_id
        );
        let input_encodings = self.input_encodings().retime(unrolled.input_names());
        let output_encodings = self.output_encodings().retime(unrolled.output_names());
        Self::from_parts(unrolled, &input_encodings, &output_encodings, valid_id)
    }
}
