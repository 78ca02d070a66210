//! Bounded unrolling of sequential circuits.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aig::Aig;
use crate::circuit::{bind, insert_unique};
use crate::{Bus, Circuit, CircuitError, PortKind, timed_name};

/// How [`Circuit::unroll`] treats latches and intermediate outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnrollOptions {
    /// Substitute latch initial values. When false, each latch's starting
    /// value becomes an input `<latch>##time_0`.
    pub init: bool,
    /// Hide latch values. When false, each step's next latch value becomes
    /// an output `<latch>##time_<t>`.
    pub omit_latches: bool,
    /// Keep only the outputs of the final step.
    pub only_last_outputs: bool,
}

impl Default for UnrollOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl UnrollOptions {
    /// Initial values substituted, latches hidden, every step's outputs kept.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            init: true,
            omit_latches: true,
            only_last_outputs: false,
        }
    }

    /// Set [`UnrollOptions::init`].
    #[must_use]
    pub const fn with_init(mut self, init: bool) -> Self {
        self.init = init;
        self
    }

    /// Set [`UnrollOptions::omit_latches`].
    #[must_use]
    pub const fn with_omit_latches(mut self, omit_latches: bool) -> Self {
        self.omit_latches = omit_latches;
        self
    }

    /// Set [`UnrollOptions::only_last_outputs`].
    #[must_use]
    pub const fn with_only_last_outputs(mut self, only_last_outputs: bool) -> Self {
        self.only_last_outputs = only_last_outputs;
        self
    }
}

impl Circuit {
    /// Expand the circuit into `horizon` combinational copies.
    ///
    /// Step `t` (counting from 0) reads inputs `<name>##time_<t>` and drives
    /// outputs `<name>##time_<t+1>`. The result has no latches.
    ///
    /// # Errors
    ///
    /// [`CircuitError::DuplicatePort`] when timed names collide, for example a
    /// latch exposed under the same name as an output.
    pub fn unroll(&self, horizon: usize, options: &UnrollOptions) -> Result<Self, CircuitError> {
        let mut aig = Aig::new();
        let mut inputs = IndexMap::new();
        let mut outputs = IndexMap::new();

        let mut state = Vec::with_capacity(self.latches.len());
        for (name, latch) in &self.latches {
            if options.init {
                state.push(Bus::constant(&latch.init));
            } else {
                let bus = Bus::new(aig.leaves(latch.width()));
                insert_unique(&mut inputs, PortKind::Input, timed_name(name, 0), bus.clone())?;
                state.push(bus);
            }
        }

        for time in 0..horizon {
            let mut subst = HashMap::new();
            for (name, bus) in &self.inputs {
                let fresh = Bus::new(aig.leaves(bus.width()));
                bind(&mut subst, bus, &fresh);
                insert_unique(&mut inputs, PortKind::Input, timed_name(name, time), fresh)?;
            }
            for (latch, current) in self.latches.values().zip(&state) {
                bind(&mut subst, &latch.state, current);
            }

            let map = aig.import(&self.aig, &subst);
            state = self
                .latches
                .values()
                .map(|latch| latch.next.translate(&map))
                .collect();

            let step = time + 1;
            if options.only_last_outputs && step != horizon {
                continue;
            }
            for (name, bus) in &self.outputs {
                insert_unique(&mut outputs, PortKind::Output, timed_name(name, step), bus.translate(&map))?;
            }
            if !options.omit_latches {
                for (name, bus) in self.latches.keys().zip(&state) {
                    insert_unique(&mut outputs, PortKind::Output, timed_name(name, step), bus.clone())?;
                }
            }
        }

        debug!(
            horizon,
            inputs = inputs.len(),
            outputs = outputs.len(),
            nodes = aig.node_count(),
            "unrolled circuit"
        );
        Ok(Self {
            aig,
            inputs,
            outputs,
            latches: IndexMap::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults() {
        let options = UnrollOptions::default();
        assert!(options.init);
        assert!(options.omit_latches);
        assert!(!options.only_last_outputs);
    }

    #[test]
    fn test_options_from_partial_json() {
        let options: UnrollOptions =
            serde_json::from_str(r#"{"only_last_outputs": true}"#).unwrap();
        assert_eq!(options, UnrollOptions::new().with_only_last_outputs(true));
    }
}
