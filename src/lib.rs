// src/lib.rs

//! `qblur` - Quantum blur for small grayscale height maps
//!
//! A height map is encoded into the amplitudes of a qubit register, rotated by a
//! few gates, and decoded from the resulting basis-state probabilities. Because
//! the grid is laid out along Gray-code lines, single-qubit rotations move height
//! between neighbouring cells, which shows up as a blur of the original image.
//!
//! * [`grid`] lays a grid onto bit strings.
//! * [`codec`] encodes, decodes, rescales and combines amplitude vectors.
//! * [`circuits`] carries encodings in circuits and builds blur layers.
//! * [`simulation`] defines the [`Backend`] capability and a reference [`Simulator`].

pub mod core;
pub mod grid;
pub mod codec;
pub mod operations;
pub mod circuits;
pub mod simulation;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use crate::core::{BlurError, GridShape, HeightMap, Result, StateVector};
pub use grid::{BitString, GridIndex, build_grid, build_line};
pub use codec::{combine, decode, encode, encode_square, log_rescale, normalize};
pub use operations::{Axis, Operation};
pub use circuits::{Circuit, CircuitBuilder};
pub use circuits::adapter::{circuit_to_height, combine_circuits, height_to_circuit};
pub use circuits::blur::{BlurStep, blur_circuit};
pub use simulation::{Backend, SimulationResult, Simulator};
pub use validation::{check_normalization, check_probabilities};

// Example: blur a small image
// Encodes a 4x4 height map, appends a spread layer and decodes the simulated
// probabilities back into a height map of the same shape.
/// ```
/// use qblur::{BlurStep, HeightMap, Simulator, blur_circuit, circuit_to_height, height_to_circuit};
///
/// let mut values = vec![0.0; 16];
/// values[5] = 1.0; // (1, 1)
/// let map = HeightMap::square(values).expect("16 is a square");
///
/// let mut circuit = height_to_circuit(&map, None).expect("non-zero map");
/// let blur = blur_circuit(circuit.num_qubits(), &[BlurStep::Spread(10.0)], None).expect("even register");
/// circuit.append(&blur).expect("same width");
///
/// let blurred = circuit_to_height(&Simulator::new(), &circuit, false).expect("shape tag present");
/// assert_eq!(blurred.shape(), map.shape());
/// // The brightest cell is still the original one, but neighbours picked up height.
/// assert_eq!(blurred.get(1, 1), Some(1.0));
/// assert!(blurred.values().iter().filter(|&&h| h > 0.0).count() > 1);
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
