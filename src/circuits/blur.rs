// src/circuits/blur.rs

//! Rotation layers that blur an encoded square image.
//!
//! For a square grid on `n` qubits, qubits `0..n/2` carry the Y bit string and
//! `n/2..n` the X bit string, with qubit `j` and `n/2 + j` at the same depth of
//! their Gray-code lines.

use super::Circuit;
use crate::core::{BlurError, DEFAULT_BLUR_ANGLE, Result};
use crate::operations::{Axis, Operation};

/// One accumulated blur instruction. The amount multiplies the base angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlurStep {
    /// Partially swaps every Y qubit with its X partner. A total angle of `π`
    /// swaps them outright, transposing the image.
    Mix(f64),
    /// Rotates every qubit about X, more strongly for lower qubits, spreading
    /// height into neighbouring cells.
    Spread(f64),
}

/// Builds the rotation circuit for a sequence of blur steps.
///
/// `theta` is the angle of one unit of amount, [`DEFAULT_BLUR_ANGLE`] if `None`.
///
/// # Errors
/// `InvalidDimension` if `num_qubits` is odd or zero; the layers need X/Y pairs.
pub fn blur_circuit(num_qubits: usize, steps: &[BlurStep], theta: Option<f64>) -> Result<Circuit> {
    if num_qubits == 0 || num_qubits % 2 != 0 {
        return Err(BlurError::InvalidDimension {
            message: format!("Blur layers need an even, non-zero qubit count, got {}", num_qubits),
        });
    }
    let theta = theta.unwrap_or(DEFAULT_BLUR_ANGLE);
    let reg = num_qubits / 2;

    let mut circuit = Circuit::new(num_qubits);
    for step in steps {
        match *step {
            BlurStep::Mix(amount) => {
                for q in 0..reg {
                    circuit.add_operations([
                        Operation::ControlledFlip { control: q, target: q + reg },
                        Operation::ControlledRotation { axis: Axis::X, control: q + reg, target: q, theta: amount * theta },
                        Operation::ControlledFlip { control: q, target: q + reg },
                    ])?;
                }
            }
            BlurStep::Spread(amount) => {
                for j in 0..reg {
                    let angle = amount * theta * 2.0 * 2f64.powi(-(j as i32));
                    for q in [j, reg + j] {
                        circuit.add_operation(Operation::Rotation { axis: Axis::X, target: q, theta: angle })?;
                    }
                }
            }
        }
    }
    Ok(circuit)
}
