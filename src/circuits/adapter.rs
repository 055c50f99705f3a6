// src/circuits/adapter.rs

//! Moving height maps in and out of circuits.

use super::Circuit;
use crate::codec::{combine, decode, encode, square_shape_for_qubits};
use crate::core::{HeightMap, Result};
use crate::simulation::Backend;
use tracing::debug;

/// Encodes `map` and returns a circuit whose only step initializes it, tagged
/// with the map's shape.
///
/// # Errors
/// Everything `codec::encode` reports, and `Incoherence` for an all-zero map,
/// whose zero vector cannot be used as a register state.
pub fn height_to_circuit(map: &HeightMap, epsilon: Option<f64>) -> Result<Circuit> {
    let (amplitudes, shape) = encode(map, epsilon)?;
    let num_qubits = amplitudes.num_qubits().unwrap_or(0);
    let mut circuit = Circuit::new(num_qubits);
    circuit.initialize(amplitudes)?;
    circuit.set_shape(Some(shape));
    Ok(circuit)
}

/// Runs `circuit` on `backend` and decodes the probabilities into a height map.
///
/// The grid shape comes from the circuit's shape tag. Without one, a square grid
/// of side `2^(n/2)` is inferred from the qubit count `n`.
///
/// # Errors
/// Backend failures, `UnresolvableShape` when no tag is present and `n` is odd, and
/// the `codec::decode` errors.
pub fn circuit_to_height<B: Backend + ?Sized>(backend: &B, circuit: &Circuit, use_log: bool) -> Result<HeightMap> {
    let shape = match circuit.shape() {
        Some(shape) => shape,
        None => square_shape_for_qubits(circuit.num_qubits())?,
    };
    let probabilities = backend.probabilities(circuit)?;
    decode(&probabilities, Some(shape), use_log)
}

/// Combines two initialization-only circuits into one on `n_a + n_b` qubits.
///
/// The new circuit is initialized with the tensor product of the two prepared
/// states (a missing initialization counts as `|0...0>`), or left empty when
/// neither circuit initializes anything. Its shape tag is cleared: the combined
/// register no longer describes a single grid.
///
/// # Errors
/// `CombineContractViolation` if either circuit contains a non-initialization step.
pub fn combine_circuits(a: &Circuit, b: &Circuit) -> Result<Circuit> {
    let state_a = a.initialization()?;
    let state_b = b.initialization()?;

    let mut combined = Circuit::new(a.num_qubits() + b.num_qubits());
    if let Some(amplitudes) = combine(state_a, state_b, a.dim()?, b.dim()?)? {
        combined.initialize(amplitudes)?;
    }
    combined.set_shape(None);
    debug!(qubits_a = a.num_qubits(), qubits_b = b.num_qubits(), "combined circuits");
    Ok(combined)
}
