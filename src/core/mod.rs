// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod height;
pub mod shape;
pub mod state;

// Re-export public types for convenient access via `qblur::core::TypeName`
pub use error::{BlurError, Result};
pub use height::HeightMap;
pub use shape::GridShape;
pub use state::StateVector;

pub mod constants;
pub use constants::blur_constants::{DEFAULT_BLUR_ANGLE, DEFAULT_EPSILON, DEFAULT_NORM_TOLERANCE};
