//! Interpolation of sampled data.

pub mod cell;
pub mod grid;
pub mod hermite;

pub use cell::{BicubicSample, BiquinticSample, HermiteBicubic, HermiteBiquintic};
pub use grid::BicubicGrid2;
