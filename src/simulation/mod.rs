// src/simulation/mod.rs

//! Running circuits.
//!
//! The codec only needs one capability from a simulator: turn a circuit into a
//! probability distribution over basis-state indices. That capability is the
//! [`Backend`] trait. [`Simulator`] is the in-crate reference implementation, a
//! plain state-vector engine that knows the gates the blur uses.

mod results;
pub(crate) mod engine;

pub use results::SimulationResult;

use crate::circuits::Circuit;
use crate::core::{DEFAULT_NORM_TOLERANCE, Result};
use engine::SimulationEngine;
use tracing::debug;

/// Anything that can run a circuit and report basis-state probabilities.
///
/// Implementations return a vector of length `2^num_qubits` of non-negative values
/// summing to 1 (up to floating-point tolerance).
pub trait Backend {
    fn probabilities(&self, circuit: &Circuit) -> Result<Vec<f64>>;
}

/// The reference state-vector simulator.
#[derive(Debug, Clone)]
pub struct Simulator {
    /// Tolerance used when checking `Initialize` vectors.
    norm_tolerance: f64,
}

impl Default for Simulator {
    fn default() -> Self {
        Self { norm_tolerance: DEFAULT_NORM_TOLERANCE }
    }
}

impl Simulator {
    /// Creates a new Simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the normalization tolerance applied to initialization vectors.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.norm_tolerance = tolerance;
        self
    }

    /// Runs every operation of `circuit` on a register starting in `|0...0>`.
    ///
    /// # Returns
    /// * `Ok(SimulationResult)` with the final state and its probabilities.
    /// * `Err(BlurError)` if the register is too wide or an operation is invalid.
    pub fn run(&self, circuit: &Circuit) -> Result<SimulationResult> {
        let mut engine = SimulationEngine::init(circuit.num_qubits(), self.norm_tolerance)?;
        for op in circuit.operations() {
            engine.apply_operation(op)?;
        }
        debug!(qubits = circuit.num_qubits(), operations = circuit.len(), "ran circuit");
        Ok(SimulationResult::new(engine.into_state()))
    }
}

impl Backend for Simulator {
    fn probabilities(&self, circuit: &Circuit) -> Result<Vec<f64>> {
        Ok(self.run(circuit)?.into_probabilities())
    }
}
