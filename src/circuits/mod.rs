// src/circuits/mod.rs

//! Circuits: an ordered list of operations on a fixed-width register, plus the
//! optional shape tag that records which grid an initialization encodes.
//!
//! [`adapter`] moves height maps in and out of circuits and [`blur`] builds the
//! rotation layers that blur an encoded image.

pub mod adapter;
pub mod blur;

use crate::core::{BlurError, GridShape, Result, StateVector};
use crate::operations::Operation;
use crate::validation::check_normalization;
use std::fmt;

/// An ordered sequence of operations on `num_qubits` qubits.
///
/// Analogy: a stripped-down `qiskit.QuantumCircuit` that only knows the gates the
/// blur needs.
#[derive(Clone, PartialEq)]
pub struct Circuit {
    num_qubits: usize,
    operations: Vec<Operation>,
    /// Shape of the grid the initialization encodes, when known.
    shape: Option<GridShape>,
}

impl Circuit {
    /// Creates an empty circuit. The register starts in `|0...0>`.
    pub fn new(num_qubits: usize) -> Self {
        Self { num_qubits, operations: Vec::new(), shape: None }
    }

    /// Number of basis states, `2^num_qubits`.
    pub fn dim(&self) -> Result<usize> {
        1usize.checked_shl(self.num_qubits as u32).ok_or_else(|| BlurError::InvalidDimension {
            message: format!("{} qubits overflow the basis index", self.num_qubits),
        })
    }

    /// Records a state preparation step.
    ///
    /// # Errors
    /// * `ShapeMismatch` if the vector length is not `2^num_qubits`.
    /// * `Incoherence` if the vector is not normalized. Normalizing is the codec's job.
    pub fn initialize(&mut self, amplitudes: StateVector) -> Result<()> {
        self.initialize_with_tolerance(amplitudes, None)
    }

    /// Like [`initialize`](Self::initialize), with the normalization tolerance
    /// overridden. Pair a loose tolerance with `Simulator::with_tolerance` so the
    /// simulator accepts the same vector.
    pub fn initialize_with_tolerance(&mut self, amplitudes: StateVector, tolerance: Option<f64>) -> Result<()> {
        let dim = self.dim()?;
        if amplitudes.dim() != dim {
            return Err(BlurError::ShapeMismatch { expected: dim, actual: amplitudes.dim() });
        }
        check_normalization(&amplitudes, tolerance)?;
        self.operations.push(Operation::Initialize { amplitudes });
        Ok(())
    }

    /// Appends an operation after checking it against the register width.
    ///
    /// # Errors
    /// `InvalidOperation` if a qubit index is out of range or a control equals its
    /// target, and the [`initialize`](Self::initialize) errors for `Initialize`.
    pub fn add_operation(&mut self, op: Operation) -> Result<()> {
        if let Operation::Initialize { amplitudes } = op {
            return self.initialize(amplitudes);
        }
        let qubits = op.involved_qubits();
        if let Some(q) = qubits.iter().find(|&&q| q >= self.num_qubits) {
            return Err(BlurError::InvalidOperation {
                message: format!("Qubit {} is outside a {}-qubit circuit ({})", q, self.num_qubits, op),
            });
        }
        if qubits.len() == 2 && qubits[0] == qubits[1] {
            return Err(BlurError::InvalidOperation {
                message: format!("Control and target qubits cannot be the same ({})", op),
            });
        }
        self.operations.push(op);
        Ok(())
    }

    /// Appends multiple operations, stopping at the first invalid one.
    pub fn add_operations<I>(&mut self, ops: I) -> Result<()>
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op)?;
        }
        Ok(())
    }

    /// Appends every operation of `other`, like concatenating two circuits.
    /// The shape tag of `self` is kept.
    ///
    /// # Errors
    /// `InvalidOperation` if the two circuits differ in width.
    pub fn append(&mut self, other: &Circuit) -> Result<()> {
        if other.num_qubits != self.num_qubits {
            return Err(BlurError::InvalidOperation {
                message: format!(
                    "Cannot append a {}-qubit circuit to a {}-qubit circuit",
                    other.num_qubits, self.num_qubits
                ),
            });
        }
        self.operations.extend(other.operations.iter().cloned());
        Ok(())
    }

    /// The prepared amplitude vector of a circuit that contains only initialization.
    ///
    /// Returns the last `Initialize` step's vector, or `None` for an empty circuit.
    ///
    /// # Errors
    /// `CombineContractViolation` if any other operation is present.
    pub fn initialization(&self) -> Result<Option<&StateVector>> {
        if let Some(other) = self.operations.iter().find(|op| !op.is_initialization()) {
            return Err(BlurError::CombineContractViolation {
                message: format!("Combined circuits should contain only initialization, found {}", other),
            });
        }
        Ok(self.operations.iter().rev().find_map(|op| match op {
            Operation::Initialize { amplitudes } => Some(amplitudes),
            _ => None,
        }))
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Returns a slice containing the ordered sequence of operations in this circuit.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// The shape tag, `None` when unknown.
    pub fn shape(&self) -> Option<GridShape> {
        self.shape
    }

    pub fn set_shape(&mut self, shape: Option<GridShape>) {
        self.shape = shape;
    }

    /// Sets the shape tag from its text form. Unparseable text clears the tag.
    pub fn set_shape_tag(&mut self, tag: &str) {
        self.shape = tag.parse().ok();
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// Builds a [`Circuit`] through method chaining; validation happens in `build`.
pub struct CircuitBuilder {
    num_qubits: usize,
    operations: Vec<Operation>,
    shape: Option<GridShape>,
}

impl CircuitBuilder {
    pub fn new(num_qubits: usize) -> Self {
        Self { num_qubits, operations: Vec::new(), shape: None }
    }

    /// Adds a single operation to the circuit being built.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.operations.push(op);
        self
    }

    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.operations.extend(ops);
        self
    }

    pub fn with_shape(mut self, shape: GridShape) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Finalizes the circuit, checking every operation in order.
    pub fn build(self) -> Result<Circuit> {
        let mut circuit = Circuit::new(self.num_qubits);
        circuit.add_operations(self.operations)?;
        circuit.set_shape(self.shape);
        Ok(circuit)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = self.shape.map(|s| s.to_string()).unwrap_or_else(|| "None".to_string());
        writeln!(
            f,
            "qblur::Circuit[{} operations on {} qubits, shape {}]",
            self.operations.len(),
            self.num_qubits,
            shape
        )?;
        for (t, op) in self.operations.iter().enumerate() {
            writeln!(f, "  {:>3}: {}", t, op)?;
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::Axis;

    #[test]
    fn test_initialize_checks_length_and_norm() {
        let mut circuit = Circuit::new(2);
        assert_eq!(
            circuit.initialize(StateVector::from_real(&[1.0, 0.0])),
            Err(BlurError::ShapeMismatch { expected: 4, actual: 2 })
        );
        assert!(matches!(
            circuit.initialize(StateVector::from_real(&[1.0, 1.0, 0.0, 0.0])),
            Err(BlurError::Incoherence { .. })
        ));
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_add_operation_checks_qubits() {
        let mut circuit = Circuit::new(2);
        assert!(matches!(
            circuit.add_operation(Operation::Rotation { axis: Axis::X, target: 2, theta: 0.1 }),
            Err(BlurError::InvalidOperation { .. })
        ));
        assert!(matches!(
            circuit.add_operation(Operation::ControlledFlip { control: 1, target: 1 }),
            Err(BlurError::InvalidOperation { .. })
        ));
        assert!(circuit.add_operation(Operation::ControlledFlip { control: 0, target: 1 }).is_ok());
        assert_eq!(circuit.len(), 1);
    }

    #[test]
    fn test_initialization_contract() -> Result<()> {
        let mut circuit = Circuit::new(1);
        assert_eq!(circuit.initialization()?, None);

        circuit.initialize(StateVector::from_real(&[0.0, 1.0]))?;
        assert_eq!(circuit.initialization()?, Some(&StateVector::from_real(&[0.0, 1.0])));

        circuit.add_operation(Operation::Rotation { axis: Axis::Y, target: 0, theta: 0.3 })?;
        assert!(matches!(circuit.initialization(), Err(BlurError::CombineContractViolation { .. })));
        Ok(())
    }

    #[test]
    fn test_append_requires_same_width() -> Result<()> {
        let mut left = CircuitBuilder::new(2).with_shape(GridShape::square(2)).build()?;
        let right = CircuitBuilder::new(2).add_op(Operation::ControlledFlip { control: 0, target: 1 }).build()?;
        left.append(&right)?;
        assert_eq!(left.len(), 1);
        assert_eq!(left.shape(), Some(GridShape::square(2)));

        assert!(matches!(left.append(&Circuit::new(3)), Err(BlurError::InvalidOperation { .. })));
        Ok(())
    }

    #[test]
    fn test_shape_tag_text() {
        let mut circuit = Circuit::new(4);
        circuit.set_shape_tag("(4,4)");
        assert_eq!(circuit.shape(), Some(GridShape::square(4)));
        circuit.set_shape_tag("None");
        assert_eq!(circuit.shape(), None);
    }

    #[test]
    fn test_display_lists_operations() -> Result<()> {
        let circuit = CircuitBuilder::new(2)
            .with_shape(GridShape::square(2))
            .add_op(Operation::ControlledFlip { control: 0, target: 1 })
            .build()?;
        let text = circuit.to_string();
        assert!(text.starts_with("qblur::Circuit[1 operations on 2 qubits, shape (2,2)]"));
        assert!(text.contains("cx q0 -> q1"));
        Ok(())
    }
}
