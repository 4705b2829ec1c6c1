//! Distance between a 2D segment and a circle.

use crate::distance::line_circle::{do_query, finish, LinearCircleDistance};
use crate::primitives::{Circle2, Segment2};
use crate::query::Distance;
use nalgebra::{Point2, RealField};

impl<T: RealField + Copy> Distance<Circle2<T>> for Segment2<T> {
    type Output = LinearCircleDistance<T>;

    fn distance(&self, circle: &Circle2<T>) -> Self::Output {
        let zero = T::zero();
        let one = T::one();
        let delta = self.p0 - circle.center;
        let direction = self.p1 - self.p0;
        let mut result = do_query(delta, direction, circle.radius);

        // Restrict the line result to t in [0, 1].
        if result.num_closest_pairs == 2 {
            let t0 = result.parameter[0];
            let t1 = result.parameter[1];
            if t1 < zero {
                update(&mut result, self, circle, 0, zero);
            } else if t0 > one {
                update(&mut result, self, circle, 1, one);
            } else if t0 < zero && t1 > one {
                // The segment is strictly inside the circle; the closest
                // circle points are reached from the endpoints.
                let r0 = self.p0.distance(circle);
                let r1 = self.p1.distance(circle);
                if r0.sqr_distance < r1.sqr_distance {
                    update(&mut result, self, circle, 0, zero);
                } else if r1.sqr_distance < r0.sqr_distance {
                    update(&mut result, self, circle, 1, one);
                } else {
                    // Both endpoints are equally close.
                    result.num_closest_pairs = 2;
                    result.parameter = [zero, one];
                    result.closest[0] = [
                        Point2::from(self.p0 - circle.center),
                        Point2::from(r0.closest[1] - circle.center),
                    ];
                    result.closest[1] = [
                        Point2::from(self.p1 - circle.center),
                        Point2::from(r1.closest[1] - circle.center),
                    ];
                }
            } else if t0 < zero {
                // Only the larger root lies on the segment.
                result.num_closest_pairs = 1;
                result.parameter[0] = t1;
                result.closest[0] = result.closest[1];
            } else if t1 > one {
                result.num_closest_pairs = 1;
            }
        } else {
            let t = result.parameter[0];
            if t < zero {
                update(&mut result, self, circle, 0, zero);
            } else if t > one {
                update(&mut result, self, circle, 1, one);
            }
        }

        finish(&mut result, circle.center);
        result
    }
}

// The line-closest parameter falls outside [0, 1]; the named segment
// endpoint is closest. Results stay in circle-centered coordinates.
fn update<T: RealField + Copy>(
    result: &mut LinearCircleDistance<T>,
    segment: &Segment2<T>,
    circle: &Circle2<T>,
    endpoint: usize,
    parameter: T,
) {
    let point = if endpoint == 0 { segment.p0 } else { segment.p1 };
    let pc_result = point.distance(circle);
    result.num_closest_pairs = 1;
    result.parameter[0] = parameter;
    result.closest[0] = [
        Point2::from(point - circle.center),
        Point2::from(pc_result.closest[1] - circle.center),
    ];
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    #[test]
    fn segment_before_circle() {
        let segment = Segment2::new(Point2::new(-10.0, 0.0), Point2::new(-8.0, 0.0));
        let circle: Circle2<f64> = Circle2::new(Point2::new(0.0, 0.0), 5.0);
        let result = segment.distance(&circle);
        assert_eq!(result.num_closest_pairs, 1);
        assert!((result.distance - 3.0).abs() < TOLERANCE);
        assert!((result.closest[0][0] - segment.p1).norm() < TOLERANCE);
        assert!((result.closest[0][1] - Point2::new(-5.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn segment_crossing_twice() {
        let segment = Segment2::new(Point2::new(-10.0, 3.0), Point2::new(10.0, 3.0));
        let circle: Circle2<f64> = Circle2::new(Point2::new(0.0, 0.0), 5.0);
        let result = segment.distance(&circle);
        assert_eq!(result.num_closest_pairs, 2);
        assert!(result.distance < TOLERANCE);
        assert!((result.closest[0][0] - Point2::new(-4.0, 3.0)).norm() < TOLERANCE);
        assert!((result.closest[1][0] - Point2::new(4.0, 3.0)).norm() < TOLERANCE);
    }

    #[test]
    fn segment_inside_circle_nearer_endpoint() {
        let segment = Segment2::new(Point2::new(0.0, 0.0), Point2::new(3.0, 0.0));
        let circle: Circle2<f64> = Circle2::new(Point2::new(0.0, 0.0), 5.0);
        let result = segment.distance(&circle);
        assert_eq!(result.num_closest_pairs, 1);
        assert!((result.distance - 2.0).abs() < TOLERANCE);
        assert!((result.closest[0][0] - segment.p1).norm() < TOLERANCE);
        assert!((result.closest[0][1] - Point2::new(5.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn centered_segment_reports_both_endpoints() {
        let segment = Segment2::new(Point2::new(-2.0, 0.0), Point2::new(2.0, 0.0));
        let circle: Circle2<f64> = Circle2::new(Point2::new(0.0, 0.0), 5.0);
        let result = segment.distance(&circle);
        assert_eq!(result.num_closest_pairs, 2);
        assert!((result.distance - 3.0).abs() < TOLERANCE);
        assert!((result.closest[0][1] - Point2::new(-5.0, 0.0)).norm() < TOLERANCE);
        assert!((result.closest[1][1] - Point2::new(5.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn segment_ending_inside_keeps_entry_point() {
        let segment = Segment2::new(Point2::new(-10.0, 0.0), Point2::new(0.0, 0.0));
        let circle: Circle2<f64> = Circle2::new(Point2::new(0.0, 0.0), 5.0);
        let result = segment.distance(&circle);
        assert_eq!(result.num_closest_pairs, 1);
        assert!(result.distance < TOLERANCE);
        assert!((result.closest[0][0] - Point2::new(-5.0, 0.0)).norm() < TOLERANCE);
    }
}
