//! Tensor-product B-spline surfaces.

use crate::curve::{BasisEval, BasisFunction};
use crate::error::{GeometryError, Result};
use nalgebra::{RealField, SVector};

/// Position and partial derivatives of a surface at `(u, v)`, through
/// second order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceJet<T: RealField + Copy, const D: usize> {
    pub position: SVector<T, D>,
    pub du: SVector<T, D>,
    pub dv: SVector<T, D>,
    pub duu: SVector<T, D>,
    pub duv: SVector<T, D>,
    pub dvv: SVector<T, D>,
}

impl<T: RealField + Copy, const D: usize> Default for SurfaceJet<T, D> {
    fn default() -> Self {
        Self {
            position: SVector::zeros(),
            du: SVector::zeros(),
            dv: SVector::zeros(),
            duu: SVector::zeros(),
            duv: SVector::zeros(),
            dvv: SVector::zeros(),
        }
    }
}

/// Tensor-product B-spline surface. The control grid is stored row-major
/// as `controls[i0 + num_controls_u * i1]` with `i0` the u index.
#[derive(Debug, Clone, PartialEq)]
pub struct BSplineSurface<T: RealField + Copy, const D: usize> {
    basis_u: BasisFunction<T>,
    basis_v: BasisFunction<T>,
    controls: Vec<SVector<T, D>>,
}

impl<T: RealField + Copy, const D: usize> BSplineSurface<T, D> {
    pub fn new(
        basis_u: BasisFunction<T>,
        basis_v: BasisFunction<T>,
        controls: Vec<SVector<T, D>>,
    ) -> Result<Self> {
        let expected = basis_u.num_controls() * basis_v.num_controls();
        if controls.len() != expected {
            return Err(GeometryError::Degenerate(format!(
                "surface control grid needs {expected} points, got {}",
                controls.len()
            ))
            .into());
        }
        Ok(Self {
            basis_u,
            basis_v,
            controls,
        })
    }

    /// Surface with open uniform knots on `[0, 1] x [0, 1]`.
    pub fn open_uniform(
        degree_u: usize,
        degree_v: usize,
        num_controls_u: usize,
        num_controls_v: usize,
        controls: Vec<SVector<T, D>>,
    ) -> Result<Self> {
        let basis_u = BasisFunction::open_uniform(num_controls_u, degree_u)?;
        let basis_v = BasisFunction::open_uniform(num_controls_v, degree_v)?;
        Self::new(basis_u, basis_v, controls)
    }

    #[must_use]
    pub fn domain(&self) -> ((T, T), (T, T)) {
        (
            (self.basis_u.min_domain(), self.basis_u.max_domain()),
            (self.basis_v.min_domain(), self.basis_v.max_domain()),
        )
    }

    #[must_use]
    pub fn num_controls(&self) -> (usize, usize) {
        (self.basis_u.num_controls(), self.basis_v.num_controls())
    }

    #[must_use]
    pub fn controls(&self) -> &[SVector<T, D>] {
        &self.controls
    }

    #[must_use]
    pub fn control(&self, i0: usize, i1: usize) -> SVector<T, D> {
        self.controls[i0 + self.basis_u.num_controls() * i1]
    }

    fn compute(
        &self,
        eval_u: &BasisEval<T>,
        eval_v: &BasisEval<T>,
        order_u: usize,
        order_v: usize,
    ) -> SVector<T, D> {
        let stride = self.basis_u.num_controls();
        let mut result = SVector::zeros();
        for iv in eval_v.min_index..=eval_v.max_index {
            let bv = eval_v.value(order_v, iv);
            for iu in eval_u.min_index..=eval_u.max_index {
                let bu = eval_u.value(order_u, iu);
                result += self.controls[iu + stride * iv] * (bu * bv);
            }
        }
        result
    }

    /// Position and partial derivatives through `order` (at most 2) at
    /// `(u, v)`, clamped to the domain.
    #[must_use]
    pub fn evaluate(&self, u: T, v: T, order: usize) -> SurfaceJet<T, D> {
        let order = order.min(2);
        let eval_u = self.basis_u.evaluate(u, order);
        let eval_v = self.basis_v.evaluate(v, order);

        let mut jet = SurfaceJet::default();
        jet.position = self.compute(&eval_u, &eval_v, 0, 0);
        if order >= 1 {
            jet.du = self.compute(&eval_u, &eval_v, 1, 0);
            jet.dv = self.compute(&eval_u, &eval_v, 0, 1);
            if order >= 2 {
                jet.duu = self.compute(&eval_u, &eval_v, 2, 0);
                jet.duv = self.compute(&eval_u, &eval_v, 1, 1);
                jet.dvv = self.compute(&eval_u, &eval_v, 0, 2);
            }
        }
        jet
    }

    #[must_use]
    pub fn position(&self, u: T, v: T) -> SVector<T, D> {
        self.evaluate(u, v, 0).position
    }
}
