// src/simulation/engine.rs
use crate::core::{BlurError, Result, StateVector};
use crate::operations::{Axis, Operation};
use crate::validation::check_normalization;
use num_complex::Complex;
use num_traits::{One, Zero};
use tracing::trace;

/// State-vector engine behind [`Simulator`](super::Simulator).
///
/// Holds the `2^n` amplitudes of the register. Qubit `q` is bit `q` of the
/// basis index (little-endian).
#[derive(Debug)]
pub(crate) struct SimulationEngine {
    state: StateVector,
    num_qubits: usize,
    norm_tolerance: f64,
}

impl SimulationEngine {
    /// Initializes the register to `|0...0>`.
    pub(crate) fn init(num_qubits: usize, norm_tolerance: f64) -> Result<Self> {
        let dim = 1usize.checked_shl(num_qubits as u32).ok_or_else(|| BlurError::InvalidDimension {
            message: format!("{} qubits overflow the state vector dimension", num_qubits),
        })?;
        Ok(Self { state: StateVector::ground(dim), num_qubits, norm_tolerance })
    }

    #[cfg(test)]
    pub(crate) fn get_state(&self) -> &StateVector {
        &self.state
    }

    pub(crate) fn into_state(self) -> StateVector {
        self.state
    }

    /// Applies a single operation to the register.
    pub(crate) fn apply_operation(&mut self, op: &Operation) -> Result<()> {
        trace!(qubits = self.num_qubits, %op, "applying operation");
        match op {
            Operation::Initialize { amplitudes } => {
                if amplitudes.dim() != self.state.dim() {
                    return Err(BlurError::ShapeMismatch { expected: self.state.dim(), actual: amplitudes.dim() });
                }
                check_normalization(amplitudes, Some(self.norm_tolerance))?;
                self.state = amplitudes.clone();
            }
            Operation::Rotation { axis, target, theta } => {
                self.check_qubit(*target)?;
                self.apply_single_qubit_gate(*target, &rotation_matrix(*axis, *theta));
            }
            Operation::ControlledFlip { control, target } => {
                self.check_pair(*control, *target)?;
                self.apply_controlled_gate(*control, *target, &flip_matrix());
            }
            Operation::ControlledRotation { axis, control, target, theta } => {
                self.check_pair(*control, *target)?;
                self.apply_controlled_gate(*control, *target, &rotation_matrix(*axis, *theta));
            }
        }
        Ok(())
    }

    fn check_qubit(&self, qubit: usize) -> Result<()> {
        if qubit >= self.num_qubits {
            return Err(BlurError::InvalidOperation {
                message: format!("Qubit {} not found in a {}-qubit register", qubit, self.num_qubits),
            });
        }
        Ok(())
    }

    fn check_pair(&self, control: usize, target: usize) -> Result<()> {
        self.check_qubit(control)?;
        self.check_qubit(target)?;
        if control == target {
            return Err(BlurError::InvalidOperation {
                message: "Control and target qubits cannot be the same for controlled operation".to_string(),
            });
        }
        Ok(())
    }

    /// Applies a 2x2 matrix to every pair of basis states that differ only at `target`.
    fn apply_single_qubit_gate(&mut self, target: usize, matrix: &[[Complex<f64>; 2]; 2]) {
        let mask = 1usize << target;
        let amplitudes = self.state.vector_mut();
        for i0 in (0..amplitudes.len()).filter(|i| i & mask == 0) {
            let i1 = i0 | mask;
            let (psi_0, psi_1) = (amplitudes[i0], amplitudes[i1]);
            amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
    }

    /// Like `apply_single_qubit_gate`, restricted to basis states with the control bit set.
    fn apply_controlled_gate(&mut self, control: usize, target: usize, matrix: &[[Complex<f64>; 2]; 2]) {
        let control_mask = 1usize << control;
        let target_mask = 1usize << target;
        let amplitudes = self.state.vector_mut();
        for i0 in (0..amplitudes.len()).filter(|i| i & control_mask != 0 && i & target_mask == 0) {
            let i1 = i0 | target_mask;
            let (psi_0, psi_1) = (amplitudes[i0], amplitudes[i1]);
            amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
    }
}

/// `exp(-i * theta/2 * sigma)` for the Pauli matrix of `axis`.
fn rotation_matrix(axis: Axis, theta: f64) -> [[Complex<f64>; 2]; 2] {
    let half = theta / 2.0;
    let (c, s) = (half.cos(), half.sin());
    match axis {
        // Rx(theta) = [[cos(a), -i*sin(a)], [-i*sin(a), cos(a)]] where a=theta/2
        Axis::X => [
            [Complex::new(c, 0.0), Complex::new(0.0, -s)],
            [Complex::new(0.0, -s), Complex::new(c, 0.0)],
        ],
        Axis::Y => [
            [Complex::new(c, 0.0), Complex::new(-s, 0.0)],
            [Complex::new(s, 0.0), Complex::new(c, 0.0)],
        ],
        Axis::Z => [
            [Complex::new(c, -s), Complex::zero()],
            [Complex::zero(), Complex::new(c, s)],
        ],
    }
}

fn flip_matrix() -> [[Complex<f64>; 2]; 2] {
    [[Complex::zero(), Complex::one()], [Complex::one(), Complex::zero()]]
}
