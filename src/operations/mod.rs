// src/operations/mod.rs

//! Operations a circuit can record.
//!
//! Qubits are addressed by plain indices in little-endian order: qubit `q`
//! corresponds to bit `q` of a basis-state index. For an encoded grid the low
//! qubits hold the Y-axis bit string and the high qubits the X-axis one.

use crate::core::StateVector;
use std::fmt;

/// Rotation axis of a single-qubit rotation gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// A step recorded in a [`Circuit`](crate::circuits::Circuit).
#[derive(Debug, Clone, PartialEq)] // f64 fields rule out Eq
pub enum Operation {
    /// Replaces the register's state with a prepared amplitude vector.
    ///
    /// The vector has length `2^num_qubits` and is normalized; the circuit checks
    /// both before recording the step.
    Initialize {
        amplitudes: StateVector,
    },

    /// Single-qubit rotation `exp(-i * theta/2 * sigma_axis)`.
    Rotation {
        axis: Axis,
        target: usize,
        /// Rotation angle in radians.
        theta: f64,
    },

    /// Flips `target` when `control` is `|1>` (CNOT).
    ControlledFlip {
        control: usize,
        target: usize,
    },

    /// Applies a rotation to `target` when `control` is `|1>`.
    ControlledRotation {
        axis: Axis,
        control: usize,
        target: usize,
        theta: f64,
    },
}

impl Operation {
    /// Qubit indices the operation acts on. Empty for `Initialize`, which acts on all.
    pub fn involved_qubits(&self) -> Vec<usize> {
        match self {
            Operation::Initialize { .. } => Vec::new(),
            Operation::Rotation { target, .. } => vec![*target],
            Operation::ControlledFlip { control, target } => vec![*control, *target],
            Operation::ControlledRotation { control, target, .. } => vec![*control, *target],
        }
    }

    /// `true` for the state-preparation step.
    pub fn is_initialization(&self) -> bool {
        matches!(self, Operation::Initialize { .. })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Initialize { amplitudes } => write!(f, "init[{} amplitudes]", amplitudes.dim()),
            Operation::Rotation { axis, target, theta } => write!(f, "r{}({:.4}) q{}", axis, theta, target),
            Operation::ControlledFlip { control, target } => write!(f, "cx q{} -> q{}", control, target),
            Operation::ControlledRotation { axis, control, target, theta } => {
                write!(f, "cr{}({:.4}) q{} -> q{}", axis, theta, control, target)
            }
        }
    }
}
