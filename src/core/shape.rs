// src/core/shape.rs

use super::error::BlurError;
use std::fmt;
use std::str::FromStr;

/// The `(width, height)` of an encoded grid.
///
/// Attached to a circuit as its shape tag so a decoder can rebuild the grid
/// without guessing from the qubit count. The text form is `(w,h)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridShape {
    pub width: usize,
    pub height: usize,
}

impl GridShape {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// A `side x side` grid.
    pub fn square(side: usize) -> Self {
        Self::new(side, side)
    }

    /// Number of grid cells.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.width, self.height)
    }
}

impl FromStr for GridShape {
    type Err = BlurError;

    /// Parses the literal `(w,h)` form. Nothing else is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BlurError::InvalidDimension {
            message: format!("'{}' is not a (width,height) shape tag", s),
        };
        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;
        let (w, h) = inner.split_once(',').ok_or_else(invalid)?;
        let width = w.trim().parse::<usize>().map_err(|_| invalid())?;
        let height = h.trim().parse::<usize>().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Self { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_tag_form() {
        assert_eq!(GridShape::new(32, 16).to_string(), "(32,16)");
    }

    #[test]
    fn test_parse_tag() -> Result<(), BlurError> {
        assert_eq!("(4,4)".parse::<GridShape>()?, GridShape::square(4));
        assert_eq!(" ( 8 , 2 ) ".parse::<GridShape>()?, GridShape::new(8, 2));
        Ok(())
    }

    #[test]
    fn test_parse_rejects_anything_else() {
        for tag in ["None", "", "(4)", "4,4", "(4,4,4)", "(-1,4)", "(0,4)", "(a,b)", "(4,4)+1"] {
            assert!(tag.parse::<GridShape>().is_err(), "tag {:?} should not parse", tag);
        }
    }
}
