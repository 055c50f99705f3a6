// src/simulation/results.rs
use crate::core::StateVector;
use std::fmt;

/// Holds the outcome of running a circuit: the final state and its probabilities.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    state: StateVector,
    probabilities: Vec<f64>,
}

impl SimulationResult {
    pub(crate) fn new(state: StateVector) -> Self {
        let probabilities = state.probabilities();
        Self { state, probabilities }
    }

    /// Final amplitude vector of the register.
    pub fn state(&self) -> &StateVector {
        &self.state
    }

    /// Probability of every basis state, in basis-index order.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn into_probabilities(self) -> Vec<f64> {
        self.probabilities
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Results:")?;
        let width = self.state.num_qubits().unwrap_or(0);
        let mut shown = 0;
        for (index, p) in self.probabilities.iter().enumerate() {
            if *p > 1e-12 {
                writeln!(f, "  |{:0width$b}>: {:.6}", index, p, width = width)?;
                shown += 1;
            }
        }
        if shown == 0 {
            writeln!(f, "  All basis states have zero probability.")?;
        }
        Ok(())
    }
}
