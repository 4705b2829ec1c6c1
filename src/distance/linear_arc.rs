//! Distance between a 2D line, ray, or segment and a circular arc.
//!
//! Each query runs the corresponding circle query first and keeps the
//! closest pairs whose circle point lies on the arc. When none survive,
//! the closest pair involves an arc endpoint or a linear-primitive
//! endpoint; the candidates are sorted by squared distance and equal
//! minima with distinct arc points are both reported.

use crate::distance::line_circle::LinearCircleDistance;
use crate::primitives::{Arc2, Circle2, Line2, Ray2, Segment2};
use crate::query::Distance;
use nalgebra::{Point2, RealField};

struct SortItem<T: RealField + Copy> {
    sqr_distance: T,
    parameter: T,
    closest: [Point2<T>; 2],
}

impl<T: RealField + Copy> Distance<Arc2<T>> for Line2<T> {
    type Output = LinearCircleDistance<T>;

    fn distance(&self, arc: &Arc2<T>) -> Self::Output {
        let circle = Circle2::new(arc.center, arc.radius);
        let lc_result = self.distance(&circle);
        if let Some(result) = keep_arc_pairs(&lc_result, arc) {
            return result;
        }

        // No circle-closest point is on the arc; an arc endpoint is
        // closest to the line.
        let candidates = [arc.end0, arc.end1].map(|end| {
            let pl_result = end.distance(self);
            SortItem {
                sqr_distance: pl_result.sqr_distance,
                parameter: pl_result.parameter,
                closest: [pl_result.closest[1], end],
            }
        });
        resolve(candidates.into())
    }
}

impl<T: RealField + Copy> Distance<Arc2<T>> for Ray2<T> {
    type Output = LinearCircleDistance<T>;

    fn distance(&self, arc: &Arc2<T>) -> Self::Output {
        let circle = Circle2::new(arc.center, arc.radius);
        let rc_result = self.distance(&circle);
        if let Some(result) = keep_arc_pairs(&rc_result, arc) {
            return result;
        }

        let mut candidates: Vec<SortItem<T>> = [arc.end0, arc.end1]
            .map(|end| {
                let pr_result = end.distance(self);
                SortItem {
                    sqr_distance: pr_result.sqr_distance,
                    parameter: pr_result.parameter,
                    closest: [pr_result.closest[1], end],
                }
            })
            .into();
        let pa_result = self.origin.distance(arc);
        candidates.push(SortItem {
            sqr_distance: pa_result.sqr_distance,
            parameter: T::zero(),
            closest: [self.origin, pa_result.closest[1]],
        });
        resolve(candidates)
    }
}

impl<T: RealField + Copy> Distance<Arc2<T>> for Segment2<T> {
    type Output = LinearCircleDistance<T>;

    fn distance(&self, arc: &Arc2<T>) -> Self::Output {
        let circle = Circle2::new(arc.center, arc.radius);
        let sc_result = self.distance(&circle);
        if let Some(result) = keep_arc_pairs(&sc_result, arc) {
            return result;
        }

        let mut candidates: Vec<SortItem<T>> = [arc.end0, arc.end1]
            .map(|end| {
                let ps_result = end.distance(self);
                SortItem {
                    sqr_distance: ps_result.sqr_distance,
                    parameter: ps_result.parameter,
                    closest: [ps_result.closest[1], end],
                }
            })
            .into();
        for (point, parameter) in [(self.p0, T::zero()), (self.p1, T::one())] {
            let pa_result = point.distance(arc);
            candidates.push(SortItem {
                sqr_distance: pa_result.sqr_distance,
                parameter,
                closest: [point, pa_result.closest[1]],
            });
        }
        resolve(candidates)
    }
}

// Retains the circle-query pairs whose circle point is on the arc, or
// reports that none survive.
fn keep_arc_pairs<T: RealField + Copy>(
    circle_result: &LinearCircleDistance<T>,
    arc: &Arc2<T>,
) -> Option<LinearCircleDistance<T>> {
    let mut result = LinearCircleDistance::default();
    for j in 0..circle_result.num_closest_pairs {
        if arc.contains(&circle_result.closest[j][1]) {
            let k = result.num_closest_pairs;
            result.parameter[k] = circle_result.parameter[j];
            result.closest[k] = circle_result.closest[j];
            result.num_closest_pairs += 1;
        }
    }
    if result.num_closest_pairs > 0 {
        let diff = result.closest[0][0] - result.closest[0][1];
        result.sqr_distance = diff.dot(&diff);
        result.distance = result.sqr_distance.sqrt();
        Some(result)
    } else {
        None
    }
}

// Selects the minimum-distance candidate. Two candidates at the same
// distance with distinct arc points are both reported.
fn resolve<T: RealField + Copy>(mut candidates: Vec<SortItem<T>>) -> LinearCircleDistance<T> {
    candidates.sort_by(|a, b| {
        a.sqr_distance
            .partial_cmp(&b.sqr_distance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut result = LinearCircleDistance::default();
    let item0 = &candidates[0];
    result.sqr_distance = item0.sqr_distance;
    result.distance = item0.sqr_distance.sqrt();
    result.parameter[0] = item0.parameter;
    result.closest[0] = item0.closest;
    result.num_closest_pairs = 1;

    if candidates.len() > 1 {
        let item1 = &candidates[1];
        if item0.sqr_distance == item1.sqr_distance && item0.closest[1] != item1.closest[1] {
            result.parameter[1] = item1.parameter;
            result.closest[1] = item1.closest;
            result.num_closest_pairs = 2;
        }
    }
    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;
    use nalgebra::Vector2;

    fn upper_right_arc() -> Arc2<f64> {
        Arc2::new(
            Point2::new(0.0, 0.0),
            1.0,
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        )
    }

    #[test]
    fn line_crossing_the_arc() {
        // The vertical line x = 0.5 crosses the circle twice but only the
        // upper crossing is on the arc.
        let line = Line2::new(Point2::new(0.5, -10.0), Vector2::new(0.0, 1.0));
        let result = line.distance(&upper_right_arc());
        assert_eq!(result.num_closest_pairs, 1);
        assert!(result.distance < TOLERANCE);
        let expected = Point2::new(0.5, (0.75_f64).sqrt());
        assert!((result.closest[0][1] - expected).norm() < TOLERANCE);
    }

    #[test]
    fn line_missing_the_arc_side() {
        // The line y = -2 is closest to the circle at (0, -1), which is
        // off the arc; the nearer arc endpoint (1, 0) wins.
        let line = Line2::new(Point2::new(0.0, -2.0), Vector2::new(1.0, 0.0));
        let result = line.distance(&upper_right_arc());
        assert_eq!(result.num_closest_pairs, 1);
        assert!((result.distance - 2.0).abs() < TOLERANCE);
        assert!((result.closest[0][1] - Point2::new(1.0, 0.0)).norm() < TOLERANCE);
    }

    #[test]
    fn line_equidistant_from_both_endpoints() {
        // The line x + y = -1 is equally far from both arc endpoints.
        let line = Line2::new(Point2::new(-1.0, 0.0), Vector2::new(1.0, -1.0));
        let result = line.distance(&upper_right_arc());
        assert_eq!(result.num_closest_pairs, 2);
    }

    #[test]
    fn ray_origin_closest_to_arc_interior() {
        let ray = Ray2::new(Point2::new(3.0, 3.0), Vector2::new(1.0, 1.0));
        let result = ray.distance(&upper_right_arc());
        assert_eq!(result.num_closest_pairs, 1);
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert!((result.closest[0][0] - Point2::new(3.0, 3.0)).norm() < TOLERANCE);
        assert!((result.closest[0][1] - Point2::new(s, s)).norm() < TOLERANCE);
        assert!((result.distance - (18.0_f64.sqrt() - 1.0)).abs() < TOLERANCE);
    }

    #[test]
    fn segment_far_below_uses_endpoint_pair() {
        let segment = Segment2::new(Point2::new(2.0, -3.0), Point2::new(5.0, -3.0));
        let result = segment.distance(&upper_right_arc());
        assert_eq!(result.num_closest_pairs, 1);
        // The closest pair joins the segment start and the arc endpoint
        // (1, 0).
        assert!((result.closest[0][1] - Point2::new(1.0, 0.0)).norm() < TOLERANCE);
        let expected = (1.0_f64 + 9.0).sqrt();
        assert!((result.distance - expected).abs() < TOLERANCE);
    }

    #[test]
    fn segment_touching_arc() {
        let segment = Segment2::new(Point2::new(0.2, 2.0), Point2::new(0.2, 0.0));
        let result = segment.distance(&upper_right_arc());
        assert!(result.distance < TOLERANCE);
        let expected = Point2::new(0.2, (1.0_f64 - 0.04).sqrt());
        assert!((result.closest[0][1] - expected).norm() < TOLERANCE);
    }
}
