//! Error handling logic

use thiserror::Error;

/// Result type for codec, circuit and simulation operations.
pub type Result<T> = std::result::Result<T, BlurError>;

/// Failures raised while encoding, decoding or simulating a height map.
///
/// Every variant is a local, synchronous failure. None of them are transient, so
/// callers should treat them as programming errors rather than retrying.
/// An all-zero input is not an error: the codec maps it to an all-zero output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlurError {
    /// A height map or grid dimension is empty or cannot describe a grid.
    #[error("Invalid Dimension: {message}")]
    InvalidDimension {
        /// InvalidDimension failure message
        message: String,
    },

    /// A height value handed to the encoder is negative or not finite.
    #[error("Negative Height: value {value} at index {index} must be finite and non-negative")]
    NegativeHeight {
        /// Position of the offending value in the row-major height map
        index: usize,
        /// The offending value
        value: f64,
    },

    /// A vector length does not match the size implied by a shape or qubit count.
    #[error("Shape Mismatch: expected length {expected}, got {actual}")]
    ShapeMismatch {
        /// Length implied by the shape or qubit count
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// No shape tag was available and the qubit count cannot be split into a square grid.
    #[error("Unresolvable Shape: {num_qubits} qubits cannot be split evenly between two axes")]
    UnresolvableShape {
        /// Qubit count the shape was to be inferred from
        num_qubits: usize,
    },

    /// A circuit handed to `combine_circuits` contains more than initialization.
    #[error("Combine Contract Violation: {message}")]
    CombineContractViolation {
        /// CombineContractViolation failure message
        message: String,
    },

    /// An amplitude or probability vector failed its normalization check.
    #[error("Incoherence Violation: {message}")]
    Incoherence {
        /// Incoherence failure message
        message: String,
    },

    /// A gate or circuit operation is inconsistent with the circuit it is applied to.
    #[error("Invalid Operation: {message}")]
    InvalidOperation {
        /// InvalidOperation failure message
        message: String,
    },
}
