//! Least-squares and minimization fits of geometric models to samples.

pub mod arcs;
pub mod bspline_fit;
pub mod ellipsoid;
pub mod parabola;

pub use arcs::{approximate_curve_by_arcs, ArcApproximation};
pub use bspline_fit::fit_bspline_surface;
pub use ellipsoid::{fit_ellipsoid, EllipsoidFit};
pub use parabola::{fit_parabola, fit_parabola_robust, ParabolaFit, RobustParabolaFit};
