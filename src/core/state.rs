// src/core/state.rs

use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt;

/// An amplitude vector over the `2^n` basis states of an `n`-qubit register.
///
/// Entry `i` is the amplitude of the basis state whose bit string is the binary
/// form of `i`. The codec produces L2-normalized vectors; this type itself does
/// not enforce normalization, `validation::check_normalization` does.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
    /// Wraps an existing amplitude buffer.
    pub fn new(amplitudes: Vec<Complex<f64>>) -> Self {
        Self { amplitudes }
    }

    /// Builds a vector with real amplitudes and zero phases.
    pub fn from_real(amplitudes: &[f64]) -> Self {
        Self::new(amplitudes.iter().map(|&a| Complex::new(a, 0.0)).collect())
    }

    /// The all-zero vector of length `dim`.
    pub fn zeros(dim: usize) -> Self {
        Self::new(vec![Complex::zero(); dim])
    }

    /// The basis vector `[1, 0, 0, ...]` of length `dim`, i.e. every qubit in `|0>`.
    pub fn ground(dim: usize) -> Self {
        let mut state = Self::zeros(dim);
        if let Some(first) = state.amplitudes.first_mut() {
            *first = Complex::one();
        }
        state
    }

    /// Provides read-only access to the amplitudes.
    pub fn vector(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn vector_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Number of basis states represented.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Qubit count `n` when the length is exactly `2^n`.
    pub fn num_qubits(&self) -> Option<usize> {
        let dim = self.dim();
        dim.is_power_of_two().then(|| dim.trailing_zeros() as usize)
    }

    /// `sum(|a_i|^2)` over all entries.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }

    /// Squared modulus of every amplitude, in basis-index order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|c| c.norm_sqr()).collect()
    }

    pub fn into_inner(self) -> Vec<Complex<f64>> {
        self.amplitudes
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_state() {
        let state = StateVector::ground(4);
        assert_eq!(state.dim(), 4);
        assert_eq!(state.vector()[0], Complex::new(1.0, 0.0));
        assert!(state.vector()[1..].iter().all(|c| c.is_zero()));
        assert_eq!(state.num_qubits(), Some(2));
    }

    #[test]
    fn test_num_qubits_requires_power_of_two() {
        assert_eq!(StateVector::zeros(6).num_qubits(), None);
        assert_eq!(StateVector::zeros(1).num_qubits(), Some(0));
        assert_eq!(StateVector::zeros(32).num_qubits(), Some(5));
    }

    #[test]
    fn test_probabilities_are_squared_moduli() {
        let state = StateVector::new(vec![Complex::new(0.6, 0.0), Complex::new(0.0, 0.8)]);
        let probs = state.probabilities();
        assert!((probs[0] - 0.36).abs() < 1e-12);
        assert!((probs[1] - 0.64).abs() < 1e-12);
        assert!((state.norm_sqr() - 1.0).abs() < 1e-12);
    }
}
