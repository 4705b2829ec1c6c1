//! Distance from a point to a solid convex polyhedron, solved as a convex
//! quadratic program through the LCP formulation.

use crate::primitives::ConvexPolyhedron3;
use crate::solvers::LcpSolver;
use nalgebra::{Point3, RealField};

/// Result of a point-polyhedron distance query.
///
/// The distance and closest-point members are meaningful only when
/// `query_is_successful` is true; on failure they stay at zero.
/// `num_lcp_iterations` is reported either way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointPolyhedronDistance3<T: RealField + Copy> {
    pub query_is_successful: bool,
    pub distance: T,
    pub sqr_distance: T,
    pub closest: [Point3<T>; 2],
    pub num_lcp_iterations: usize,
}

impl<T: RealField + Copy> Default for PointPolyhedronDistance3<T> {
    fn default() -> Self {
        Self {
            query_is_successful: false,
            distance: T::zero(),
            sqr_distance: T::zero(),
            closest: [Point3::origin(); 2],
            num_lcp_iterations: 0,
        }
    }
}

/// Reusable point-polyhedron query context.
///
/// The LCP workspace is sized for `num_triangles + 3` variables at
/// construction, so repeated queries against polyhedra with that face
/// count allocate nothing.
pub struct PointPolyhedronQuery<T: RealField + Copy> {
    lcp: LcpSolver<T>,
    q: Vec<T>,
    m: Vec<T>,
    w: Vec<T>,
    z: Vec<T>,
}

impl<T: RealField + Copy> PointPolyhedronQuery<T> {
    #[must_use]
    pub fn new(num_triangles: usize) -> Self {
        let n = num_triangles + 3;
        Self {
            lcp: LcpSolver::new(n),
            q: vec![T::zero(); n],
            m: vec![T::zero(); n * n],
            w: vec![T::zero(); n],
            z: vec![T::zero(); n],
        }
    }

    /// Overrides the pivot budget of the embedded LCP solver.
    pub fn set_max_lcp_iterations(&mut self, max_iterations: usize) {
        self.lcp.set_max_iterations(max_iterations);
    }

    /// Computes the distance from `point` to the solid polyhedron. The
    /// polyhedron's triangle count must match the count this context was
    /// built for.
    pub fn distance(
        &mut self,
        point: &Point3<T>,
        polyhedron: &ConvexPolyhedron3<T>,
    ) -> PointPolyhedronDistance3<T> {
        let zero = T::zero();
        let one = T::one();
        let mut result = PointPolyhedronDistance3::default();

        let num_triangles = polyhedron.num_triangles();
        let n = num_triangles + 3;
        if n != self.q.len() {
            return result;
        }

        // Set up q and M as if the polyhedron were translated to the first
        // octant by -box.min. Minimize |x - (point - min)|^2 subject to
        // x >= 0 and N x <= c - N min for the outward face planes.
        let min = polyhedron.aligned_box().min;
        for r in 0..3 {
            self.q[r] = min[r] - point[r];
        }
        for t in 0..num_triangles {
            let plane = &polyhedron.planes()[t];
            self.q[3 + t] = plane.constant - plane.normal.dot(&min.coords);
        }

        for value in &mut self.m {
            *value = zero;
        }
        self.m[0] = one;
        self.m[n + 1] = one;
        self.m[2 * n + 2] = one;
        for t in 0..num_triangles {
            let normal = polyhedron.planes()[t].normal;
            let c = 3 + t;
            for r in 0..3 {
                self.m[n * r + c] = normal[r];
                self.m[n * c + r] = -normal[r];
            }
        }

        let status = self.lcp.solve(&self.q, &self.m, &mut self.w, &mut self.z);
        result.num_lcp_iterations = self.lcp.num_iterations();
        if status.is_success() {
            result.query_is_successful = true;
            result.closest[0] = *point;
            result.closest[1] = Point3::new(
                self.z[0] + min[0],
                self.z[1] + min[1],
                self.z[2] + min[2],
            );
            let diff = result.closest[1] - result.closest[0];
            result.sqr_distance = diff.dot(&diff);
            result.distance = result.sqr_distance.sqrt();
        }
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;
    use crate::primitives::polyhedron::tests::unit_cube;

    #[test]
    fn point_outside_face() {
        let cube = unit_cube();
        let mut query = PointPolyhedronQuery::new(cube.num_triangles());
        let result = query.distance(&Point3::new(0.5, 0.5, 4.0), &cube);
        assert!(result.query_is_successful);
        assert!((result.distance - 3.0).abs() < TOLERANCE);
        assert!((result.closest[1] - Point3::new(0.5, 0.5, 1.0)).norm() < TOLERANCE);
    }

    #[test]
    fn point_inside_has_zero_distance() {
        let cube = unit_cube();
        let mut query = PointPolyhedronQuery::new(cube.num_triangles());
        let result = query.distance(&Point3::new(0.5, 0.5, 0.5), &cube);
        assert!(result.query_is_successful);
        assert!(result.distance < TOLERANCE);
    }

    #[test]
    fn point_nearest_to_corner() {
        let cube = unit_cube();
        let mut query = PointPolyhedronQuery::new(cube.num_triangles());
        let result = query.distance(&Point3::new(3.0, 3.0, 3.0), &cube);
        assert!(result.query_is_successful);
        assert!((result.closest[1] - Point3::new(1.0, 1.0, 1.0)).norm() < 1e-8);
        assert!((result.distance - 12.0_f64.sqrt()).abs() < 1e-8);
    }

    #[test]
    fn mismatched_context_reports_failure() {
        let cube = unit_cube();
        let mut query = PointPolyhedronQuery::new(4);
        let result = query.distance(&Point3::new(0.0, 0.0, 5.0), &cube);
        assert!(!result.query_is_successful);
        assert_eq!(result.num_lcp_iterations, 0);
    }
}
