//! Intersection of two triangles in 2D. Both triangles are solids and
//! their vertices must be counterclockwise ordered.
//!
//! The test query uses the method of separating axes on the edge normals.
//! The find query clips one triangle against the edge half-planes of the
//! other, producing a convex polygon, a segment, a point, or nothing.

use crate::primitives::Triangle2;
use crate::query::{FindIntersection, TestIntersection};
use nalgebra::{Point2, RealField, Vector2};

/// Result of a triangle-triangle find-intersection query. The
/// intersection is nonempty iff `polygon` is nonempty; its vertices are
/// counterclockwise ordered.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleTriangleIntersection2<T: RealField + Copy> {
    pub intersect: bool,
    pub polygon: Vec<Point2<T>>,
}

impl<T: RealField + Copy> Default for TriangleTriangleIntersection2<T> {
    fn default() -> Self {
        Self {
            intersect: false,
            polygon: Vec::new(),
        }
    }
}

/// Clips a convex polygon against the half-plane `dot(normal, X) >=
/// constant`, returning the retained polygon. Vertices on the boundary
/// are kept, so a polygon touching the half-plane in a single point or
/// edge survives as that point or edge.
#[must_use]
pub fn clip_convex_polygon<T: RealField + Copy>(
    polygon: &[Point2<T>],
    normal: &Vector2<T>,
    constant: T,
) -> Vec<Point2<T>> {
    let zero = T::zero();
    let mut output = Vec::with_capacity(polygon.len() + 1);
    if polygon.is_empty() {
        return output;
    }

    let distance: Vec<T> = polygon
        .iter()
        .map(|p| normal.dot(&p.coords) - constant)
        .collect();

    for i0 in 0..polygon.len() {
        let i1 = (i0 + 1) % polygon.len();
        let d0 = distance[i0];
        let d1 = distance[i1];
        if d0 >= zero {
            output.push(polygon[i0]);
        }
        // The edge crosses the boundary strictly, so insert the crossing.
        if (d0 > zero && d1 < zero) || (d0 < zero && d1 > zero) {
            let t = d0 / (d0 - d1);
            output.push(polygon[i0] + (polygon[i1] - polygon[i0]) * t);
        }
    }
    output
}

// Projects the triangle onto the line P + t * D. Returns +1 when all
// projections are nonnegative, -1 when all are nonpositive, 0 when the
// line splits the triangle.
fn which_side<T: RealField + Copy>(
    triangle: &Triangle2<T>,
    p: &Point2<T>,
    d: &Vector2<T>,
) -> i32 {
    let zero = T::zero();
    let mut positive = 0;
    let mut negative = 0;
    for v in &triangle.v {
        let t = d.dot(&(v - p));
        if t > zero {
            positive += 1;
        } else if t < zero {
            negative += 1;
        }
        if positive > 0 && negative > 0 {
            return 0;
        }
    }
    if positive > 0 {
        1
    } else {
        -1
    }
}

// An edge of triangle0 separates when triangle1 projects strictly to the
// positive side of its inward normal line.
fn separated<T: RealField + Copy>(triangle0: &Triangle2<T>, triangle1: &Triangle2<T>) -> bool {
    let mut i0 = 2;
    for i1 in 0..3 {
        let p = triangle0.v[i0];
        let edge = triangle0.v[i1] - triangle0.v[i0];
        let d = Vector2::new(edge.y, -edge.x);
        if which_side(triangle1, &p, &d) > 0 {
            return true;
        }
        i0 = i1;
    }
    false
}

impl<T: RealField + Copy> TestIntersection<Triangle2<T>> for Triangle2<T> {
    fn test_intersection(&self, other: &Triangle2<T>) -> bool {
        !separated(self, other) && !separated(other, self)
    }
}

impl<T: RealField + Copy> FindIntersection<Triangle2<T>> for Triangle2<T> {
    type Output = TriangleTriangleIntersection2<T>;

    fn find_intersection(&self, other: &Triangle2<T>) -> Self::Output {
        // Clip the other triangle against the edges of this one. Each
        // inward edge normal is Perp(v[i0] - v[i1]).
        let mut polygon = vec![other.v[0], other.v[1], other.v[2]];
        let mut i1 = 2;
        for i0 in 0..3 {
            let edge = self.v[i1] - self.v[i0];
            let normal = Vector2::new(edge.y, -edge.x);
            let constant = normal.dot(&self.v[i0].coords);
            polygon = clip_convex_polygon(&polygon, &normal, constant);
            if polygon.is_empty() {
                return TriangleTriangleIntersection2::default();
            }
            i1 = i0;
        }
        TriangleTriangleIntersection2 {
            intersect: true,
            polygon,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    fn shoelace_area(polygon: &[Point2<f64>]) -> f64 {
        let mut twice_area = 0.0;
        for i0 in 0..polygon.len() {
            let i1 = (i0 + 1) % polygon.len();
            twice_area += polygon[i0].x * polygon[i1].y - polygon[i1].x * polygon[i0].y;
        }
        0.5 * twice_area
    }

    fn unit_right() -> Triangle2<f64> {
        Triangle2::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        )
    }

    #[test]
    fn disjoint_triangles() {
        let far = Triangle2::new(
            Point2::new(5.0, 5.0),
            Point2::new(6.0, 5.0),
            Point2::new(5.0, 6.0),
        );
        assert!(!unit_right().test_intersection(&far));
        assert!(!unit_right().find_intersection(&far).intersect);
    }

    #[test]
    fn contained_triangle_is_returned_whole() {
        let inner = Triangle2::new(
            Point2::new(0.1, 0.1),
            Point2::new(0.3, 0.1),
            Point2::new(0.1, 0.3),
        );
        assert!(unit_right().test_intersection(&inner));
        let result = unit_right().find_intersection(&inner);
        assert_eq!(result.polygon.len(), 3);
        assert!((shoelace_area(&result.polygon) - 0.02).abs() < TOLERANCE);
    }

    #[test]
    fn overlapping_translates_make_a_quadrilateral() {
        let shifted = Triangle2::new(
            Point2::new(0.25, 0.25),
            Point2::new(1.25, 0.25),
            Point2::new(0.25, 1.25),
        );
        let result = unit_right().find_intersection(&shifted);
        assert!(result.intersect);
        // The overlap is the triangle (0.25,0.25)-(0.75,0.25)-(0.25,0.75).
        assert!((shoelace_area(&result.polygon) - 0.125).abs() < TOLERANCE);
    }

    #[test]
    fn shared_edge_only() {
        let mirrored = Triangle2::new(
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(-1.0, 0.0),
        );
        // The test query requires interior overlap, so edge contact is
        // reported as separated. The find query still returns the shared
        // edge as a degenerate polygon.
        assert!(!unit_right().test_intersection(&mirrored));
        let result = unit_right().find_intersection(&mirrored);
        assert!(result.intersect);
        assert_eq!(result.polygon.len(), 2);
        assert!(shoelace_area(&result.polygon).abs() < TOLERANCE);
    }

    #[test]
    fn star_of_david_overlap() {
        let up = Triangle2::new(
            Point2::new(-1.0, -0.5),
            Point2::new(1.0, -0.5),
            Point2::new(0.0, 1.0),
        );
        let down = Triangle2::new(
            Point2::new(1.0, 0.5),
            Point2::new(-1.0, 0.5),
            Point2::new(0.0, -1.0),
        );
        assert!(up.test_intersection(&down));
        let result = up.find_intersection(&down);
        assert!(result.intersect);
        // The overlap is a hexagon.
        assert_eq!(result.polygon.len(), 6);
        assert!(shoelace_area(&result.polygon) > 0.0);
    }

    #[test]
    fn clip_helper_keeps_boundary_points() {
        let square = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let clipped = clip_convex_polygon(&square, &Vector2::new(1.0, 0.0), 0.5);
        assert!((shoelace_area(&clipped) - 0.5).abs() < TOLERANCE);
        let degenerate = clip_convex_polygon(&square, &Vector2::new(1.0, 0.0), 1.0);
        assert_eq!(degenerate.len(), 2);
    }
}
