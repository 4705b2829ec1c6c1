//! Distance between a 2D ray and a circle.

use crate::distance::line_circle::{do_query, finish, LinearCircleDistance};
use crate::primitives::{Circle2, Ray2};
use crate::query::Distance;
use nalgebra::{Point2, RealField};

impl<T: RealField + Copy> Distance<Circle2<T>> for Ray2<T> {
    type Output = LinearCircleDistance<T>;

    fn distance(&self, circle: &Circle2<T>) -> Self::Output {
        let zero = T::zero();
        let delta = self.origin - circle.center;
        let mut result = do_query(delta, self.direction, circle.radius);

        // Restrict the line result to t >= 0.
        if result.num_closest_pairs == 2 {
            if result.parameter[1] < zero {
                // Both intersections are behind the origin.
                update_to_origin(&mut result, self, circle);
            } else if result.parameter[0] < zero {
                // Only the larger root is on the ray.
                result.num_closest_pairs = 1;
                result.parameter[0] = result.parameter[1];
                result.closest[0] = result.closest[1];
            }
        } else if result.parameter[0] < zero {
            update_to_origin(&mut result, self, circle);
        }

        finish(&mut result, circle.center);
        result
    }
}

// The line-closest parameter is negative, so the ray origin is closest.
// Overwrites the result with the origin vs circle pair, in circle-centered
// coordinates so the caller's translation applies uniformly.
fn update_to_origin<T: RealField + Copy>(
    result: &mut LinearCircleDistance<T>,
    ray: &Ray2<T>,
    circle: &Circle2<T>,
) {
    let pc_result = ray.origin.distance(circle);
    result.num_closest_pairs = 1;
    result.parameter[0] = T::zero();
    result.closest[0] = [
        Point2::from(ray.origin - circle.center),
        Point2::from(pc_result.closest[1] - circle.center),
    ];
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;
    use nalgebra::Vector2;

    #[test]
    fn ray_pointing_away_uses_origin() {
        // The supporting line crosses the circle, but both crossings have
        // t < 0 for this ray.
        let ray = Ray2::new(Point2::new(10.0, 0.0), Vector2::new(1.0, 0.0));
        let circle: Circle2<f64> = Circle2::new(Point2::new(0.0, 0.0), 5.0);
        let result = ray.distance(&circle);
        assert_eq!(result.num_closest_pairs, 1);
        assert!((result.distance - 5.0).abs() < TOLERANCE);
        assert!((result.closest[0][0] - ray.origin).norm() < TOLERANCE);
        assert!((result.closest[0][1] - Point2::new(5.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn ray_from_inside_keeps_forward_crossing() {
        let ray = Ray2::new(Point2::new(0.0, 0.0), Vector2::new(1.0, 0.0));
        let circle: Circle2<f64> = Circle2::new(Point2::new(0.0, 0.0), 5.0);
        let result = ray.distance(&circle);
        assert_eq!(result.num_closest_pairs, 1);
        assert!(result.distance < TOLERANCE);
        assert!((result.closest[0][0] - Point2::new(5.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn ray_crossing_twice_keeps_both() {
        let ray = Ray2::new(Point2::new(-10.0, 3.0), Vector2::new(1.0, 0.0));
        let circle: Circle2<f64> = Circle2::new(Point2::new(0.0, 0.0), 5.0);
        let result = ray.distance(&circle);
        assert_eq!(result.num_closest_pairs, 2);
        assert!((result.closest[0][0] - Point2::new(-4.0, 3.0)).norm() < TOLERANCE);
        assert!((result.closest[1][0] - Point2::new(4.0, 3.0)).norm() < TOLERANCE);
    }

    #[test]
    fn separated_ray_with_negative_line_parameter() {
        // The line-closest point is behind the origin.
        let ray = Ray2::new(Point2::new(3.0, 8.0), Vector2::new(1.0, 0.0));
        let circle: Circle2<f64> = Circle2::new(Point2::new(0.0, 0.0), 5.0);
        let result = ray.distance(&circle);
        assert_eq!(result.num_closest_pairs, 1);
        assert!((result.closest[0][0] - ray.origin).norm() < TOLERANCE);
        let expected = (3.0_f64 * 3.0 + 8.0 * 8.0).sqrt() - 5.0;
        assert!((result.distance - expected).abs() < TOLERANCE);
    }
}
