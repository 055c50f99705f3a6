// src/codec/mod.rs

//! Conversion between height maps and amplitude vectors.
//!
//! `encode` places `sqrt(height)` of every cell on the basis state chosen by the
//! grid layout and normalizes the result. `decode` reads probabilities back onto
//! the same layout, rescaled so that the largest value is 1, with optional
//! logarithmic contrast stretching. `combine` forms the tensor product of two
//! encodings.

use crate::core::{BlurError, DEFAULT_EPSILON, GridShape, HeightMap, Result, StateVector};
use crate::grid::build_grid;
use num_complex::Complex;
use num_traits::Zero;
use tracing::{debug, warn};

/// Divides every amplitude by `sqrt(sum(|a_i|^2))`.
///
/// An all-zero vector has no direction to normalize to and is returned unchanged.
pub fn normalize(state: &StateVector) -> StateVector {
    let norm_sq = state.norm_sqr();
    if norm_sq == 0.0 {
        warn!(dim = state.dim(), "normalizing an all-zero vector, leaving it unchanged");
        return state.clone();
    }
    let scale = norm_sq.sqrt();
    StateVector::new(state.vector().iter().map(|&c| c / scale).collect())
}

/// Encodes a height map as a normalized amplitude vector.
///
/// The vector has `2^n` entries where `n` is the grid's total bit count. Cells are
/// written at their basis index with amplitude `sqrt(height)`; don't-care states
/// stay zero. The returned shape is the map's own `(width, height)`.
///
/// `epsilon` (default [`DEFAULT_EPSILON`]) is accepted for parity with the blur
/// tooling's height floor and does not change the output.
///
/// # Errors
/// * `NegativeHeight` if any value is negative or not finite.
/// * `InvalidDimension` if the grid is too large to index.
pub fn encode(map: &HeightMap, epsilon: Option<f64>) -> Result<(StateVector, GridShape)> {
    let _epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let shape = map.shape();

    if let Some((index, &value)) = map.values().iter().enumerate().find(|(_, v)| !(v.is_finite() && **v >= 0.0)) {
        return Err(BlurError::NegativeHeight { index, value });
    }

    let grid = build_grid(shape.width, Some(shape.height))?;
    let mut state = StateVector::zeros(grid.dim());
    {
        let amplitudes = state.vector_mut();
        for (index, (x, y)) in grid.iter() {
            // Cells always exist in the map for coordinates the grid produced.
            let h = map.get(x, y).unwrap_or(0.0);
            amplitudes[index] = Complex::new(h.sqrt(), 0.0);
        }
    }

    debug!(width = shape.width, height = shape.height, qubits = grid.total_bits(), "encoded height map");
    Ok((normalize(&state), shape))
}

/// Encodes a flat row-major slice, assuming a square grid.
///
/// The side is `floor(sqrt(len))`; values past the first `side * side` are ignored.
///
/// # Errors
/// `InvalidDimension` if the slice is empty, plus everything [`encode`] reports.
pub fn encode_square(heights: &[f64], epsilon: Option<f64>) -> Result<(StateVector, GridShape)> {
    let side = (heights.len() as f64).sqrt().floor() as usize;
    if side == 0 {
        return Err(BlurError::InvalidDimension { message: "Height map is empty".to_string() });
    }
    let used = side * side;
    if used < heights.len() {
        warn!(len = heights.len(), side, ignored = heights.len() - used, "height map is not square, ignoring trailing values");
    }
    let map = HeightMap::new(side, side, heights[..used].to_vec())?;
    encode(&map, epsilon)
}

/// Infers a square shape from the length of a probability vector.
///
/// The length must be `2^n` with `n` even; the side is then `2^(n/2)`.
pub fn infer_square_shape(len: usize) -> Result<GridShape> {
    if len < 4 || !len.is_power_of_two() {
        return Err(BlurError::InvalidDimension {
            message: format!("Cannot infer a grid from a vector of length {}", len),
        });
    }
    square_shape_for_qubits(len.trailing_zeros() as usize)
}

/// Square grid for an `n`-qubit register: side `2^(n/2)`, `n` must be even.
pub fn square_shape_for_qubits(num_qubits: usize) -> Result<GridShape> {
    if num_qubits < 2 || num_qubits % 2 != 0 {
        return Err(BlurError::UnresolvableShape { num_qubits });
    }
    let side = 1usize.checked_shl((num_qubits / 2) as u32).ok_or(BlurError::UnresolvableShape { num_qubits })?;
    Ok(GridShape::square(side))
}

/// Decodes a probability vector into a height map.
///
/// With `shape` absent a square grid is inferred from the vector length. Every
/// mapped basis state contributes `p / max(p)` to its cell; don't-care states are
/// ignored. An all-zero vector decodes to an all-zero map. With `use_log` the
/// result is passed through [`log_rescale`].
///
/// # Errors
/// * `ShapeMismatch` if the vector length is not `2^n` for the shape's bit count.
/// * `InvalidDimension` / `UnresolvableShape` if no shape is given and none can be inferred.
pub fn decode(probabilities: &[f64], shape: Option<GridShape>, use_log: bool) -> Result<HeightMap> {
    let shape = match shape {
        Some(shape) => shape,
        None => infer_square_shape(probabilities.len())?,
    };
    let grid = build_grid(shape.width, Some(shape.height))?;
    if probabilities.len() != grid.dim() {
        return Err(BlurError::ShapeMismatch { expected: grid.dim(), actual: probabilities.len() });
    }

    let max_p = probabilities.iter().copied().fold(0.0, f64::max);
    let mut heights = vec![0.0; shape.area()];
    if max_p > 0.0 {
        for (index, (x, y)) in grid.iter() {
            heights[x + y * shape.width] = probabilities[index] / max_p;
        }
    } else {
        warn!(width = shape.width, height = shape.height, "decoding an all-zero probability vector");
    }

    if use_log {
        log_rescale(&mut heights);
    }
    debug!(width = shape.width, height = shape.height, use_log, "decoded probabilities");
    HeightMap::new(shape.width, shape.height, heights)
}

/// Logarithmic contrast stretch, in place.
///
/// With `min_h` the smallest positive value and `base = 1 / min_h`, each positive
/// `h` becomes `max(log(h / min_h) / log(base), 0)`. Zeros stay zero. When there is
/// no positive value nothing changes; when `base == 1` positive values become 1.
pub fn log_rescale(heights: &mut [f64]) {
    let min_h = heights.iter().copied().filter(|&h| h > 0.0).fold(f64::INFINITY, f64::min);
    if !min_h.is_finite() {
        return;
    }
    let log_base = (1.0 / min_h).ln();
    for h in heights.iter_mut() {
        if *h > 0.0 {
            *h = if log_base == 0.0 { 1.0 } else { ((*h / min_h).ln() / log_base).max(0.0) };
        } else {
            *h = 0.0;
        }
    }
}

/// Tensor product of two optional amplitude vectors.
///
/// `result[i * size_b + j] = a_i * b_j`. A missing side stands for the ground state
/// `[1, 0, 0, ...]` of its size; when both are missing there is nothing to combine
/// and `None` is returned.
///
/// # Errors
/// `ShapeMismatch` if a present vector's length differs from its declared size.
pub fn combine(
    a: Option<&StateVector>,
    b: Option<&StateVector>,
    size_a: usize,
    size_b: usize,
) -> Result<Option<StateVector>> {
    if a.is_none() && b.is_none() {
        return Ok(None);
    }
    for (vector, size) in [(a, size_a), (b, size_b)] {
        if let Some(vector) = vector {
            if vector.dim() != size {
                return Err(BlurError::ShapeMismatch { expected: size, actual: vector.dim() });
            }
        }
    }

    let ground_a;
    let ground_b;
    let a = match a {
        Some(a) => a,
        None => {
            ground_a = StateVector::ground(size_a);
            &ground_a
        }
    };
    let b = match b {
        Some(b) => b,
        None => {
            ground_b = StateVector::ground(size_b);
            &ground_b
        }
    };

    let mut product = Vec::with_capacity(size_a * size_b);
    for amp_a in a.vector() {
        if amp_a.is_zero() {
            product.extend(std::iter::repeat_n(Complex::zero(), size_b));
            continue;
        }
        product.extend(b.vector().iter().map(|&amp_b| *amp_a * amp_b));
    }
    debug!(size_a, size_b, "combined amplitude vectors");
    Ok(Some(StateVector::new(product)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_1_SQRT_2;

    const TEST_TOLERANCE: f64 = 1e-12;

    fn assert_vec_approx_equal(actual: &[f64], expected: &[f64], context: &str) {
        assert_eq!(actual.len(), expected.len(), "length mismatch - {}", context);
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!((a - e).abs() < TEST_TOLERANCE, "mismatch at {} - actual {}, expected {} - {}", i, a, e, context);
        }
    }

    #[test]
    fn test_encode_diagonal_two_by_two() -> Result<()> {
        let (state, shape) = encode_square(&[1.0, 0.0, 0.0, 1.0], None)?;
        assert_eq!(shape, GridShape::square(2));
        // (0,0) -> "00" = 0 and (1,1) -> "11" = 3
        let re: Vec<f64> = state.vector().iter().map(|c| c.re).collect();
        assert_vec_approx_equal(&re, &[FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2], "diagonal encode");
        assert!(state.vector().iter().all(|c| c.im == 0.0));
        Ok(())
    }

    #[test]
    fn test_encode_square_ignores_trailing_values() -> Result<()> {
        let (state, shape) = encode_square(&[1.0, 0.0, 0.0, 1.0, 7.0], None)?;
        assert_eq!(shape, GridShape::square(2));
        let (exact, _) = encode_square(&[1.0, 0.0, 0.0, 1.0], None)?;
        assert_eq!(state, exact);

        let (_, shape) = encode_square(&[0.5; 15], None)?;
        assert_eq!(shape, GridShape::square(3));
        assert!(matches!(encode_square(&[], None), Err(BlurError::InvalidDimension { .. })));
        Ok(())
    }

    #[test]
    fn test_encode_rejects_negative_and_nan() -> Result<()> {
        let map = HeightMap::square(vec![1.0, -0.5, 0.0, 1.0])?;
        assert_eq!(encode(&map, None), Err(BlurError::NegativeHeight { index: 1, value: -0.5 }));

        let map = HeightMap::square(vec![1.0, 0.0, f64::NAN, 1.0])?;
        assert!(matches!(encode(&map, None), Err(BlurError::NegativeHeight { index: 2, .. })));
        Ok(())
    }

    #[test]
    fn test_encode_all_zero_stays_zero() -> Result<()> {
        let (state, _) = encode_square(&[0.0; 9], Some(0.5))?;
        assert_eq!(state.dim(), 16);
        assert!(state.vector().iter().all(|c| c.is_zero()));
        Ok(())
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let state = normalize(&StateVector::from_real(&[3.0, 0.0, 4.0, 1.0]));
        assert!((state.norm_sqr() - 1.0).abs() < TEST_TOLERANCE);
        let again = normalize(&state);
        for (a, b) in state.vector().iter().zip(again.vector()) {
            assert!((*a - *b).norm() <= f64::EPSILON * 4.0);
        }
    }

    #[test]
    fn test_decode_diagonal_two_by_two() -> Result<()> {
        let map = decode(&[0.5, 0.0, 0.0, 0.5], None, false)?;
        assert_eq!(map.values(), &[1.0, 0.0, 0.0, 1.0]);
        Ok(())
    }

    #[test]
    fn test_decode_all_zero() -> Result<()> {
        for use_log in [false, true] {
            let map = decode(&[0.0; 16], Some(GridShape::square(4)), use_log)?;
            assert!(map.values().iter().all(|&h| h == 0.0));
        }
        Ok(())
    }

    #[test]
    fn test_decode_ignores_dont_care_states() -> Result<()> {
        // 3x3 grid on 4 bits; basis 0b0001 is "00"+"01", y = 3 is unused
        let mut probs = vec![0.0; 16];
        probs[0b0001] = 0.9;
        probs[0b0000] = 0.1;
        let map = decode(&probs, Some(GridShape::square(3)), false)?;
        // the maximum is still taken over every basis state
        let origin = map.get(0, 0).unwrap_or_default();
        assert!((origin - 0.1 / 0.9).abs() < TEST_TOLERANCE);
        assert_eq!(map.values().iter().filter(|&&h| h > 0.0).count(), 1);
        Ok(())
    }

    #[test]
    fn test_decode_shape_mismatch() {
        assert_eq!(
            decode(&[0.25; 8], Some(GridShape::square(2)), false),
            Err(BlurError::ShapeMismatch { expected: 4, actual: 8 })
        );
    }

    #[test]
    fn test_decode_inference_failures() {
        assert_eq!(decode(&[0.125; 8], None, false), Err(BlurError::UnresolvableShape { num_qubits: 3 }));
        assert!(matches!(decode(&[0.2; 5], None, false), Err(BlurError::InvalidDimension { .. })));
        assert!(matches!(decode(&[1.0], None, false), Err(BlurError::InvalidDimension { .. })));
    }

    #[test]
    fn test_log_rescale_example() {
        let mut heights = vec![0.0, 0.1, 1.0];
        log_rescale(&mut heights);
        assert_vec_approx_equal(&heights, &[0.0, 0.0, 1.0], "log rescale");
    }

    #[test]
    fn test_log_rescale_single_level() {
        let mut heights = vec![0.0, 1.0, 1.0];
        log_rescale(&mut heights);
        assert_eq!(heights, vec![0.0, 1.0, 1.0]);

        let mut empty = vec![0.0, 0.0];
        log_rescale(&mut empty);
        assert_eq!(empty, vec![0.0, 0.0]);
    }

    #[test]
    fn test_combine_none() -> Result<()> {
        assert_eq!(combine(None, None, 4, 4)?, None);
        Ok(())
    }

    #[test]
    fn test_combine_one_sided() -> Result<()> {
        let a = StateVector::from_real(&[0.6, 0.8]);
        let left = combine(Some(&a), None, 2, 4)?.ok_or(BlurError::InvalidOperation { message: "none".into() })?;
        let re: Vec<f64> = left.vector().iter().map(|c| c.re).collect();
        assert_vec_approx_equal(&re, &[0.6, 0.0, 0.0, 0.0, 0.8, 0.0, 0.0, 0.0], "a x ground");

        let right = combine(None, Some(&a), 4, 2)?.ok_or(BlurError::InvalidOperation { message: "none".into() })?;
        let re: Vec<f64> = right.vector().iter().map(|c| c.re).collect();
        assert_vec_approx_equal(&re, &[0.6, 0.8, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0], "ground x b");
        Ok(())
    }

    #[test]
    fn test_combine_tensor_order() -> Result<()> {
        let a = StateVector::from_real(&[0.6, 0.8]);
        let b = StateVector::new(vec![Complex::new(FRAC_1_SQRT_2, 0.0), Complex::new(0.0, FRAC_1_SQRT_2)]);
        let ab = combine(Some(&a), Some(&b), 2, 2)?.ok_or(BlurError::InvalidOperation { message: "none".into() })?;
        let expected = [
            Complex::new(0.6 * FRAC_1_SQRT_2, 0.0),
            Complex::new(0.0, 0.6 * FRAC_1_SQRT_2),
            Complex::new(0.8 * FRAC_1_SQRT_2, 0.0),
            Complex::new(0.0, 0.8 * FRAC_1_SQRT_2),
        ];
        for (actual, expected) in ab.vector().iter().zip(expected) {
            assert!((*actual - expected).norm() < TEST_TOLERANCE);
        }
        assert!((ab.norm_sqr() - 1.0).abs() < TEST_TOLERANCE);
        Ok(())
    }

    #[test]
    fn test_combine_size_mismatch() {
        let a = StateVector::from_real(&[1.0, 0.0]);
        assert_eq!(combine(Some(&a), None, 4, 2), Err(BlurError::ShapeMismatch { expected: 4, actual: 2 }));
    }
}
