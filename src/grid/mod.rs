// src/grid/mod.rs

//! Bit-string layouts that place a 2-D grid onto the basis states of a register.
//!
//! Each axis gets a reflected-binary (Gray code) line of bit strings, so cells
//! that are neighbours along an axis sit on basis states one bit flip apart.
//! A rotation applied to a single qubit therefore mixes amplitude between
//! nearby cells, which is what turns gate rotations into a spatial blur.
//!
//! A cell `(x, y)` is assigned the concatenation `line_x[x] + line_y[y]`, read as
//! a binary number with the last Y bit as the least significant bit. Basis states
//! with no cell are "don't-care" states: always zero on encode, skipped on decode.

use crate::core::{BlurError, GridShape, Result};
use std::fmt;
use tracing::trace;

/// A fixed-length bit string, stored as its integer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BitString {
    value: usize,
    len: usize,
}

impl BitString {
    pub fn new(value: usize, len: usize) -> Self {
        Self { value, len }
    }

    /// Integer value of the string read as binary.
    pub fn value(&self) -> usize {
        self.value
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// This string followed by `bit` as the new last character.
    fn push(self, bit: bool) -> Self {
        Self { value: (self.value << 1) | bit as usize, len: self.len + 1 }
    }

    /// Concatenation `self + other`.
    pub fn concat(&self, other: &BitString) -> BitString {
        BitString { value: (self.value << other.len) | other.value, len: self.len + other.len }
    }

    /// Number of positions at which two equal-length strings differ.
    pub fn hamming_distance(&self, other: &BitString) -> u32 {
        (self.value ^ other.value).count_ones()
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.value, width = self.len)
    }
}

/// Bits needed for a line of `length` cells; at least one.
fn bits_for(length: usize) -> Result<usize> {
    let padded = length.checked_next_power_of_two().ok_or_else(|| BlurError::InvalidDimension {
        message: format!("Grid line length {} overflows the basis index", length),
    })?;
    Ok(padded.trailing_zeros().max(1) as usize)
}

/// Builds the Gray-code ordered line of bit strings covering `length` cells.
///
/// Starts from `["0", "1"]` and, once per extra bit, appends a reversed copy of the
/// current line to itself, then suffixes `'0'` to the first half and `'1'` to the
/// second half. The result has `2^n` entries with `n = max(1, ceil(log2(length)))`,
/// and consecutive entries (including last back to first) differ in one bit.
pub fn build_line(length: usize) -> Result<Vec<BitString>> {
    if length == 0 {
        return Err(BlurError::InvalidDimension { message: "Grid line length must be at least 1".to_string() });
    }
    let n = bits_for(length)?;

    let mut line = vec![BitString::new(0, 1), BitString::new(1, 1)];
    for _ in 1..n {
        let first = line.iter().map(|b| b.push(false));
        let second = line.iter().rev().map(|b| b.push(true));
        line = first.chain(second).collect();
    }
    trace!(length, bits = n, "built grid line");
    Ok(line)
}

/// Bijective table between grid cells and basis-state indices.
///
/// Built once per `(width, height)` and immutable afterwards. The forward table is
/// indexed by basis index (`None` marks a don't-care state); the reverse table is
/// indexed by the row-major cell position `x + y * width`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridIndex {
    shape: GridShape,
    bits_x: usize,
    bits_y: usize,
    cells: Vec<Option<(usize, usize)>>,
    positions: Vec<usize>,
}

impl GridIndex {
    /// Grid shape this table was built for.
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Total bit-string length `n_x + n_y`, i.e. the qubit count of the register.
    pub fn total_bits(&self) -> usize {
        self.bits_x + self.bits_y
    }

    pub fn bits_x(&self) -> usize {
        self.bits_x
    }

    pub fn bits_y(&self) -> usize {
        self.bits_y
    }

    /// Number of basis states, `2^total_bits`.
    pub fn dim(&self) -> usize {
        self.cells.len()
    }

    /// Number of mapped cells, `width * height`.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The cell encoded by basis state `index`, or `None` for a don't-care state.
    pub fn coordinate(&self, index: usize) -> Option<(usize, usize)> {
        self.cells.get(index).copied().flatten()
    }

    /// The basis index assigned to cell `(x, y)`.
    pub fn basis_index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.shape.width && y < self.shape.height {
            self.positions.get(x + y * self.shape.width).copied()
        } else {
            None
        }
    }

    /// The bit string assigned to cell `(x, y)`.
    pub fn bit_string(&self, x: usize, y: usize) -> Option<BitString> {
        self.basis_index(x, y).map(|index| BitString::new(index, self.total_bits()))
    }

    /// Iterates over `(basis_index, (x, y))` for every mapped cell, in basis order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, (usize, usize))> + '_ {
        self.cells.iter().enumerate().filter_map(|(index, cell)| cell.map(|xy| (index, xy)))
    }
}

/// Builds the cell/basis-state table for a `width x height` grid.
///
/// When `height` is `None` the grid is square. The bit-string length of the
/// result is available as [`GridIndex::total_bits`].
pub fn build_grid(width: usize, height: Option<usize>) -> Result<GridIndex> {
    let height = height.unwrap_or(width);
    if width == 0 || height == 0 {
        return Err(BlurError::InvalidDimension {
            message: format!("Grid dimensions must be positive, got {}x{}", width, height),
        });
    }

    let line_x = build_line(width)?;
    let line_y = build_line(height)?;
    let bits_x = line_x[0].len();
    let bits_y = line_y[0].len();
    let total_bits = bits_x + bits_y;
    let dim = 1usize.checked_shl(total_bits as u32).ok_or_else(|| BlurError::InvalidDimension {
        message: format!("Grid {}x{} needs {} bits, which overflows the basis index", width, height, total_bits),
    })?;

    let mut cells = vec![None; dim];
    let mut positions = vec![0; width * height];
    for y in 0..height {
        for x in 0..width {
            let index = line_x[x].concat(&line_y[y]).value();
            cells[index] = Some((x, y));
            positions[x + y * width] = index;
        }
    }

    Ok(GridIndex { shape: GridShape::new(width, height), bits_x, bits_y, cells, positions })
}
