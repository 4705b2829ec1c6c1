//! Parametric surface evaluation.

pub mod bspline;

pub use bspline::{BSplineSurface, SurfaceJet};
