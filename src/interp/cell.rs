//! Hermite cell polynomials on the unit square.
//!
//! A cell polynomial is `G(x, y) = sum c[i][j] P(i, x) P(j, y)` over the
//! cubic or quintic basis of [`crate::interp::hermite`]. The coefficients
//! are generated from corner samples carrying the function value and the
//! partial derivatives the basis degree supports, in lattice units. The
//! bicubic lattice interpolant is globally C1, the biquintic one C2.

use crate::interp::hermite;
use nalgebra::RealField;

/// Corner data for a bicubic cell, derivatives in lattice units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BicubicSample<T: RealField + Copy> {
    pub f: T,
    pub fx: T,
    pub fy: T,
    pub fxy: T,
}

impl<T: RealField + Copy> Default for BicubicSample<T> {
    fn default() -> Self {
        Self {
            f: T::zero(),
            fx: T::zero(),
            fy: T::zero(),
            fxy: T::zero(),
        }
    }
}

/// Bicubic Hermite polynomial for one lattice cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HermiteBicubic<T: RealField + Copy> {
    pub c: [[T; 4]; 4],
}

impl<T: RealField + Copy> HermiteBicubic<T> {
    /// Generates the coefficients from the cell's corner samples,
    /// indexed `[x][y]` with 0 the lower corner.
    #[must_use]
    pub fn from_samples(blocks: &[[BicubicSample<T>; 2]; 2]) -> Self {
        let three = crate::math::cast::<T>(3.0);
        let nine = crate::math::cast::<T>(9.0);
        let mut c = [[T::zero(); 4]; 4];
        for (b0, column) in blocks.iter().enumerate() {
            let (z0, p0) = (3 * b0, b0 + 1);
            let s0 = if b0 == 0 { T::one() } else { -T::one() };
            for (b1, sample) in column.iter().enumerate() {
                let (z1, p1) = (3 * b1, b1 + 1);
                let s1 = if b1 == 0 { T::one() } else { -T::one() };

                let v00 = sample.f;
                let v10 = three * v00 + s0 * sample.fx;
                let v01 = three * v00 + s1 * sample.fy;
                let v11 = -nine * v00 + three * (v10 + v01) + s0 * s1 * sample.fxy;

                c[z0][z1] = v00;
                c[p0][z1] = v10;
                c[z0][p1] = v01;
                c[p0][p1] = v11;
            }
        }
        Self { c }
    }

    /// Evaluates the polynomial or a partial derivative of the given
    /// orders at `(x, y)`. Orders past 3 give zero.
    #[must_use]
    pub fn evaluate(&self, x_order: usize, y_order: usize, x: T, y: T) -> T {
        let mut sum = T::zero();
        for (i, row) in self.c.iter().enumerate() {
            let px = hermite::cubic(i, x_order, x);
            for (j, &cij) in row.iter().enumerate() {
                sum += cij * px * hermite::cubic(j, y_order, y);
            }
        }
        sum
    }
}

/// Corner data for a biquintic cell, derivatives in lattice units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquinticSample<T: RealField + Copy> {
    pub f: T,
    pub fx: T,
    pub fy: T,
    pub fxx: T,
    pub fxy: T,
    pub fyy: T,
    pub fxxy: T,
    pub fxyy: T,
    pub fxxyy: T,
}

impl<T: RealField + Copy> Default for BiquinticSample<T> {
    fn default() -> Self {
        Self {
            f: T::zero(),
            fx: T::zero(),
            fy: T::zero(),
            fxx: T::zero(),
            fxy: T::zero(),
            fyy: T::zero(),
            fxxy: T::zero(),
            fxyy: T::zero(),
            fxxyy: T::zero(),
        }
    }
}

/// Biquintic Hermite polynomial for one lattice cell.
#[derive(Debug, Clone, PartialEq)]
pub struct HermiteBiquintic<T: RealField + Copy> {
    pub c: [[T; 6]; 6],
}

impl<T: RealField + Copy> HermiteBiquintic<T> {
    /// Generates the coefficients from the cell's corner samples,
    /// indexed `[x][y]` with 0 the lower corner.
    #[must_use]
    pub fn from_samples(blocks: &[[BiquinticSample<T>; 2]; 2]) -> Self {
        let k2 = crate::math::cast::<T>(2.0);
        let k4 = crate::math::cast::<T>(4.0);
        let k5 = crate::math::cast::<T>(5.0);
        let k10 = crate::math::cast::<T>(10.0);
        let k16 = crate::math::cast::<T>(16.0);
        let k20 = crate::math::cast::<T>(20.0);
        let k25 = crate::math::cast::<T>(25.0);
        let k40 = crate::math::cast::<T>(40.0);
        let k50 = crate::math::cast::<T>(50.0);
        let k100 = crate::math::cast::<T>(100.0);

        let mut c = [[T::zero(); 6]; 6];
        for (b0, column) in blocks.iter().enumerate() {
            let (z0, p0, q0) = (5 * b0, 3 * b0 + 1, b0 + 2);
            let s0 = if b0 == 0 { T::one() } else { -T::one() };
            for (b1, sample) in column.iter().enumerate() {
                let (z1, p1, q1) = (5 * b1, 3 * b1 + 1, b1 + 2);
                let s1 = if b1 == 0 { T::one() } else { -T::one() };
                let s0s1 = s0 * s1;

                let fx = s0 * sample.fx;
                let fy = s1 * sample.fy;
                let fxy = s0s1 * sample.fxy;
                let fxxy = s1 * sample.fxxy;
                let fxyy = s0 * sample.fxyy;

                let v00 = sample.f;
                let v10 = k5 * v00 + fx;
                let v01 = k5 * v00 + fy;
                let v20 = -k10 * v00 + k4 * v10 + sample.fxx / k2;
                let v11 = -k25 * v00 + k5 * (v10 + v01) + fxy;
                let v02 = -k10 * v00 + k4 * v01 + sample.fyy / k2;
                let v21 =
                    k50 * v00 - k20 * v10 - k10 * v01 + k5 * v20 + k4 * v11 + fxxy / k2;
                let v12 =
                    k50 * v00 - k20 * v01 - k10 * v10 + k5 * v02 + k4 * v11 + fxyy / k2;
                let v22 = -k100 * v00 + k40 * (v10 + v01)
                    - k10 * (v20 + v02)
                    - k16 * v11
                    + k4 * (v21 + v12)
                    + sample.fxxyy / k4;

                c[z0][z1] = v00;
                c[p0][z1] = v10;
                c[z0][p1] = v01;
                c[q0][z1] = v20;
                c[p0][p1] = v11;
                c[z0][q1] = v02;
                c[q0][p1] = v21;
                c[p0][q1] = v12;
                c[q0][q1] = v22;
            }
        }
        Self { c }
    }

    /// Evaluates the polynomial or a partial derivative of the given
    /// orders at `(x, y)`. Orders past 5 give zero.
    #[must_use]
    pub fn evaluate(&self, x_order: usize, y_order: usize, x: T, y: T) -> T {
        let mut sum = T::zero();
        for (i, row) in self.c.iter().enumerate() {
            let px = hermite::quintic(i, x_order, x);
            for (j, &cij) in row.iter().enumerate() {
                sum += cij * px * hermite::quintic(j, y_order, y);
            }
        }
        sum
    }
}
