use nalgebra::{Point3, RealField, Vector3};

/// Torus in 3D with center `center`, orthonormal frame
/// `{direction0, direction1, normal}`, major radius `radius0` and minor
/// radius `radius1` (with `radius0 >= radius1 > 0`).
///
/// The parameterization is
/// `X(u, v) = C + (r0 + r1 cos v)(cos u D0 + sin u D1) + r1 sin v N`
/// for `u, v` in `[-pi, pi]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Torus3<T: RealField + Copy> {
    pub center: Point3<T>,
    pub direction0: Vector3<T>,
    pub direction1: Vector3<T>,
    pub normal: Vector3<T>,
    pub radius0: T,
    pub radius1: T,
}

impl<T: RealField + Copy> Torus3<T> {
    pub fn new(
        center: Point3<T>,
        direction0: Vector3<T>,
        direction1: Vector3<T>,
        normal: Vector3<T>,
        radius0: T,
        radius1: T,
    ) -> Self {
        Self {
            center,
            direction0,
            direction1,
            normal,
            radius0,
            radius1,
        }
    }

    /// Torus in the xy-plane centered at the origin.
    pub fn axis_aligned(radius0: T, radius1: T) -> Self {
        Self::new(
            Point3::origin(),
            Vector3::x(),
            Vector3::y(),
            Vector3::z(),
            radius0,
            radius1,
        )
    }

    /// Surface point at angles `(u, v)`.
    #[must_use]
    pub fn evaluate(&self, u: T, v: T) -> Point3<T> {
        let (sin_u, cos_u) = u.sin_cos();
        let (sin_v, cos_v) = v.sin_cos();
        let ring = self.radius0 + self.radius1 * cos_v;
        self.center
            + (self.direction0 * cos_u + self.direction1 * sin_u) * ring
            + self.normal * (self.radius1 * sin_v)
    }

    /// Recovers the angles `(u, v)` of a point assumed to be on the torus.
    #[must_use]
    pub fn parameters_of(&self, point: &Point3<T>) -> (T, T) {
        let delta = point - self.center;
        let x = self.direction0.dot(&delta);
        let y = self.direction1.dot(&delta);
        let z = self.normal.dot(&delta);
        let u = y.atan2(x);
        let radial = (x * x + y * y).sqrt();
        let v = z.atan2(radial - self.radius0);
        (u, v)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    #[test]
    fn parameters_round_trip() {
        let torus: Torus3<f64> = Torus3::axis_aligned(2.0, 0.5);
        for &(u, v) in &[(0.0, 0.0), (1.2, -0.7), (-2.5, 2.0), (3.0, -3.0)] {
            let point = torus.evaluate(u, v);
            let (ru, rv) = torus.parameters_of(&point);
            assert!((ru - u).abs() < 1e-12, "u={u} ru={ru}");
            assert!((rv - v).abs() < 1e-12, "v={v} rv={rv}");
        }
    }

    #[test]
    fn evaluate_outer_equator() {
        let torus = Torus3::axis_aligned(2.0, 0.5);
        let point = torus.evaluate(0.0, 0.0);
        assert!((point - Point3::new(2.5, 0.0, 0.0)).norm() < TOLERANCE);
    }
}
