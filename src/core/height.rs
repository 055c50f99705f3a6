// src/core/height.rs

use super::error::{BlurError, Result};
use super::shape::GridShape;

/// A grid of heights stored row-major: the value at `(x, y)` lives at `x + y * width`.
///
/// Instances are never modified by the codec; decoding always produces a new map.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightMap {
    shape: GridShape,
    values: Vec<f64>,
}

impl HeightMap {
    /// Creates a `width x height` map from row-major values.
    pub fn new(width: usize, height: usize, values: Vec<f64>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(BlurError::InvalidDimension {
                message: format!("Height map dimensions must be positive, got {}x{}", width, height),
            });
        }
        let expected = width * height;
        if values.len() != expected {
            return Err(BlurError::ShapeMismatch { expected, actual: values.len() });
        }
        Ok(Self { shape: GridShape::new(width, height), values })
    }

    /// Creates a square map, taking the side from `sqrt(values.len())`.
    ///
    /// Lengths that are not perfect squares are rejected rather than truncated.
    pub fn square(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(BlurError::InvalidDimension { message: "Height map is empty".to_string() });
        }
        let side = (values.len() as f64).sqrt().floor() as usize;
        if side * side != values.len() {
            return Err(BlurError::InvalidDimension {
                message: format!("Height map of length {} is not a square grid", values.len()),
            });
        }
        Self::new(side, side, values)
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn width(&self) -> usize {
        self.shape.width
    }

    pub fn height(&self) -> usize {
        self.shape.height
    }

    /// Height at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x < self.shape.width && y < self.shape.height {
            self.values.get(x + y * self.shape.width).copied()
        } else {
            None
        }
    }

    /// Largest value in the map.
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_infers_side() -> Result<()> {
        let map = HeightMap::square(vec![0.0; 16])?;
        assert_eq!(map.shape(), GridShape::square(4));
        Ok(())
    }

    #[test]
    fn test_square_rejects_non_square_lengths() {
        assert!(matches!(HeightMap::square(vec![1.0; 5]), Err(BlurError::InvalidDimension { .. })));
        assert!(matches!(HeightMap::square(Vec::new()), Err(BlurError::InvalidDimension { .. })));
    }

    #[test]
    fn test_new_checks_length() {
        assert_eq!(
            HeightMap::new(3, 2, vec![0.0; 5]),
            Err(BlurError::ShapeMismatch { expected: 6, actual: 5 })
        );
        assert!(matches!(HeightMap::new(0, 2, Vec::new()), Err(BlurError::InvalidDimension { .. })));
    }

    #[test]
    fn test_row_major_access() -> Result<()> {
        let map = HeightMap::new(3, 2, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0])?;
        assert_eq!(map.get(1, 0), Some(1.0));
        assert_eq!(map.get(0, 1), Some(3.0));
        assert_eq!(map.get(2, 1), Some(5.0));
        assert_eq!(map.get(3, 0), None);
        assert_eq!(map.max(), 5.0);
        Ok(())
    }
}
