//! Bicubic Hermite interpolation of samples on a uniform 2D grid.
//!
//! The grid has `x_bound * y_bound` samples stored row-major with x
//! fastest. The node at index `(i, j)` lies at
//! `(x_min + i * x_spacing, y_min + j * y_spacing)`, so the domain
//! maximum is `min + spacing * (bound - 1)` in each direction. First
//! and mixed partial derivatives at the nodes are estimated by finite
//! differences, central in the interior and one-sided at the
//! boundaries, so the interpolator needs only function values.

use crate::error::{GeometryError, Result};
use crate::interp::cell::{BicubicSample, HermiteBicubic};
use nalgebra::RealField;

/// Bicubic Hermite interpolator over a uniform rectangular lattice.
#[derive(Debug, Clone)]
pub struct BicubicGrid2<T: RealField + Copy> {
    x_bound: usize,
    y_bound: usize,
    x_min: T,
    x_max: T,
    x_spacing: T,
    y_min: T,
    y_max: T,
    y_spacing: T,
    nodes: Vec<BicubicSample<T>>,
}

impl<T: RealField + Copy> BicubicGrid2<T> {
    /// Builds the interpolator from row-major samples (x fastest).
    ///
    /// # Errors
    ///
    /// Fails when a bound is less than 2, a spacing is not positive, or
    /// the sample count does not match `x_bound * y_bound`.
    pub fn new(
        x_bound: usize,
        y_bound: usize,
        x_min: T,
        x_spacing: T,
        y_min: T,
        y_spacing: T,
        samples: &[T],
    ) -> Result<Self> {
        if x_bound < 2 || y_bound < 2 {
            return Err(GeometryError::Degenerate(
                "grid bounds must be at least 2".to_string(),
            )
            .into());
        }
        if x_spacing <= T::zero() || y_spacing <= T::zero() {
            return Err(GeometryError::Degenerate(
                "grid spacing must be positive".to_string(),
            )
            .into());
        }
        if samples.len() != x_bound * y_bound {
            return Err(GeometryError::Degenerate(format!(
                "expected {} samples, got {}",
                x_bound * y_bound,
                samples.len()
            ))
            .into());
        }

        let x_max = x_min + x_spacing * crate::math::cast::<T>((x_bound - 1) as f64);
        let y_max = y_min + y_spacing * crate::math::cast::<T>((y_bound - 1) as f64);

        let at = |i: usize, j: usize| samples[i + x_bound * j];
        let diff = |prev: T, next: T, central: bool| {
            if central {
                crate::math::cast::<T>(0.5) * (next - prev)
            } else {
                next - prev
            }
        };

        let mut nodes = Vec::with_capacity(samples.len());
        for j in 0..y_bound {
            let (j0, j1) = neighbor_span(j, y_bound);
            for i in 0..x_bound {
                let (i0, i1) = neighbor_span(i, x_bound);
                let fx = diff(at(i0, j), at(i1, j), i1 - i0 == 2);
                let fy = diff(at(i, j0), at(i, j1), j1 - j0 == 2);
                let fxy_lo = diff(at(i0, j0), at(i1, j0), i1 - i0 == 2);
                let fxy_hi = diff(at(i0, j1), at(i1, j1), i1 - i0 == 2);
                let fxy = diff(fxy_lo, fxy_hi, j1 - j0 == 2);
                nodes.push(BicubicSample {
                    f: at(i, j),
                    fx,
                    fy,
                    fxy,
                });
            }
        }

        Ok(Self {
            x_bound,
            y_bound,
            x_min,
            x_max,
            x_spacing,
            y_min,
            y_max,
            y_spacing,
            nodes,
        })
    }

    #[must_use]
    pub fn x_min(&self) -> T {
        self.x_min
    }

    #[must_use]
    pub fn x_max(&self) -> T {
        self.x_max
    }

    #[must_use]
    pub fn y_min(&self) -> T {
        self.y_min
    }

    #[must_use]
    pub fn y_max(&self) -> T {
        self.y_max
    }

    /// Interpolated value at `(x, y)`, the input clamped to the domain.
    #[must_use]
    pub fn evaluate(&self, x: T, y: T) -> T {
        self.evaluate_order(0, 0, x, y)
    }

    /// Interpolated partial derivative of the given orders at `(x, y)`.
    /// Orders past 3 give zero.
    #[must_use]
    pub fn evaluate_order(&self, x_order: usize, y_order: usize, x: T, y: T) -> T {
        let (ix, tx) = locate(x, self.x_min, self.x_max, self.x_spacing, self.x_bound);
        let (iy, ty) = locate(y, self.y_min, self.y_max, self.y_spacing, self.y_bound);

        let node = |i: usize, j: usize| self.nodes[i + self.x_bound * j];
        let cell = HermiteBicubic::from_samples(&[
            [node(ix, iy), node(ix, iy + 1)],
            [node(ix + 1, iy), node(ix + 1, iy + 1)],
        ]);
        let sum = cell.evaluate(x_order, y_order, tx, ty);

        // Chain rule from lattice units to world units.
        let mut scale = T::one();
        for _ in 0..x_order {
            scale /= self.x_spacing;
        }
        for _ in 0..y_order {
            scale /= self.y_spacing;
        }
        sum * scale
    }
}

// Clamps to the domain and returns the cell index with the local
// coordinate in [0, 1].
fn locate<T: RealField + Copy>(value: T, min: T, max: T, spacing: T, bound: usize) -> (usize, T) {
    let clamped = crate::math::clamp(value, min, max);
    let scaled = (clamped - min) / spacing;
    let mut index = nalgebra::try_convert::<T, f64>(scaled.floor()).map_or(0, |f| f as usize);
    if index > bound - 2 {
        index = bound - 2;
    }
    let t = scaled - crate::math::cast::<T>(index as f64);
    (index, t)
}

// Neighbor indices for the finite-difference stencil at index i.
fn neighbor_span(i: usize, bound: usize) -> (usize, usize) {
    if i == 0 {
        (0, 1)
    } else if i == bound - 1 {
        (bound - 2, bound - 1)
    } else {
        (i - 1, i + 1)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    fn linear_samples(x_bound: usize, y_bound: usize) -> Vec<f64> {
        let mut samples = Vec::with_capacity(x_bound * y_bound);
        for j in 0..y_bound {
            for i in 0..x_bound {
                let x = 1.0 + 0.5 * f64::from(i as u32);
                let y = -2.0 + 0.25 * f64::from(j as u32);
                samples.push(2.0 * x + 3.0 * y - 1.0);
            }
        }
        samples
    }

    #[test]
    fn domain_maximum_uses_bound_minus_one_cells() {
        let samples = linear_samples(5, 4);
        let grid = BicubicGrid2::new(5, 4, 1.0, 0.5, -2.0, 0.25, &samples).unwrap();
        assert!((grid.x_max() - 3.0).abs() < TOLERANCE);
        assert!((grid.y_max() - (-1.25)).abs() < TOLERANCE);
    }

    #[test]
    fn invalid_grids_are_rejected() {
        let samples = vec![0.0_f64; 4];
        assert!(BicubicGrid2::new(1, 4, 0.0, 1.0, 0.0, 1.0, &samples).is_err());
        assert!(BicubicGrid2::new(2, 2, 0.0, 0.0, 0.0, 1.0, &samples).is_err());
        assert!(BicubicGrid2::new(3, 3, 0.0, 1.0, 0.0, 1.0, &samples).is_err());
    }

    #[test]
    fn lattice_values_are_interpolated() {
        let samples: Vec<f64> = (0..20).map(|k| f64::from(k) * 0.7 - 3.0).collect();
        let grid = BicubicGrid2::new(5, 4, 0.0, 1.0, 0.0, 1.0, &samples).unwrap();
        for j in 0..4 {
            for i in 0..5 {
                let expected = samples[i + 5 * j];
                let got = grid.evaluate(f64::from(i as u32), f64::from(j as u32));
                assert!((got - expected).abs() < 1e-9, "i={i} j={j}");
            }
        }
    }

    #[test]
    fn linear_data_is_reproduced_with_derivatives() {
        let samples = linear_samples(5, 4);
        let grid = BicubicGrid2::new(5, 4, 1.0, 0.5, -2.0, 0.25, &samples).unwrap();
        for &(x, y) in &[(1.2, -1.9), (2.0, -1.5), (2.9, -1.3)] {
            let expected = 2.0 * x + 3.0 * y - 1.0;
            assert!((grid.evaluate(x, y) - expected).abs() < 1e-9, "x={x} y={y}");
            assert!((grid.evaluate_order(1, 0, x, y) - 2.0).abs() < 1e-9);
            assert!((grid.evaluate_order(0, 1, x, y) - 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn queries_outside_the_domain_clamp() {
        let samples = linear_samples(5, 4);
        let grid = BicubicGrid2::new(5, 4, 1.0, 0.5, -2.0, 0.25, &samples).unwrap();
        let corner = grid.evaluate(3.0, -1.25);
        assert!((grid.evaluate(100.0, 100.0) - corner).abs() < 1e-9);
    }
}
