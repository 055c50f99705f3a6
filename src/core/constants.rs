//! Numeric defaults shared by the codec, validation and simulator.

/// Defaults used when an `Option` override is left as `None`.
pub mod blur_constants {
    /// Height floor hook accepted by `encode`. Currently has no effect on the output.
    pub const DEFAULT_EPSILON: f64 = 1e-2;
    /// Allowed deviation of `sum(|a_i|^2)` from 1.0.
    pub const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;
    /// Base rotation angle of one blur step (`π/100`).
    pub const DEFAULT_BLUR_ANGLE: f64 = std::f64::consts::PI / 100.0;
}
