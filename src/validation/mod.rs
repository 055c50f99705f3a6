// src/validation/mod.rs

//! Normalization checks for amplitude and probability vectors.

use crate::core::{BlurError, DEFAULT_NORM_TOLERANCE, Result, StateVector};

/// Checks if the state vector is normalized (sum of squared amplitudes ≈ 1.0).
///
/// # Arguments
/// * `state` - The `StateVector` to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to [`DEFAULT_NORM_TOLERANCE`].
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(BlurError::Incoherence)` otherwise.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sq = state.norm_sqr();
    if (norm_sq - 1.0).abs() > effective_tolerance || !norm_sq.is_finite() {
        Err(BlurError::Incoherence {
            message: format!(
                "State vector normalization failed. Sum(|c_i|^2) = {} (Deviation > {})",
                norm_sq, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}

/// Checks that a probability vector is non-negative and sums to 1.0 within tolerance.
pub fn check_probabilities(probabilities: &[f64], tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    if let Some((index, p)) = probabilities.iter().enumerate().find(|(_, p)| !(**p >= 0.0)) {
        return Err(BlurError::Incoherence {
            message: format!("Probability {} at index {} is negative", p, index),
        });
    }
    let total: f64 = probabilities.iter().sum();
    if (total - 1.0).abs() > effective_tolerance {
        return Err(BlurError::Incoherence {
            message: format!("Probabilities sum to {} (Deviation > {})", total, effective_tolerance),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn test_normalized_state_passes() -> Result<()> {
        check_normalization(&StateVector::from_real(&[FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2]), None)?;
        Ok(())
    }

    #[test]
    fn test_unnormalized_state_fails() {
        let state = StateVector::from_real(&[1.0, 1.0]);
        assert!(matches!(check_normalization(&state, None), Err(BlurError::Incoherence { .. })));
        assert!(check_normalization(&state, Some(1.5)).is_ok());
        assert!(check_normalization(&StateVector::zeros(4), None).is_err());
    }

    #[test]
    fn test_probabilities() {
        assert!(check_probabilities(&[0.25, 0.25, 0.5, 0.0], None).is_ok());
        assert!(check_probabilities(&[0.5, 0.25], None).is_err());
        assert!(check_probabilities(&[1.5, -0.5], None).is_err());
    }
}
