use crate::math::{Point, Real, DEFAULT_EPSILON};
use crate::shape::{Segment, SegmentPointLocation};

use na;

/// Closest points between two segments expressed in the same frame.
#[inline]
pub fn closest_points_segment_segment(
    seg1: &Segment,
    seg2: &Segment,
) -> (Point<Real>, Point<Real>) {
    let (loc1, loc2) = closest_points_segment_segment_with_locations(seg1, seg2);
    (seg1.point_at(&loc1), seg2.point_at(&loc2))
}

/// Locations of the closest points between two segments expressed in the same frame.
///
/// Parallel segments yield the pair involving the first vertex of `seg1`
/// when it is one of the closest points.
#[inline]
pub fn closest_points_segment_segment_with_locations(
    seg1: &Segment,
    seg2: &Segment,
) -> (SegmentPointLocation, SegmentPointLocation) {
    // See "Real-Time Collision Detection", Christer Ericson, §5.1.9.
    let d1 = seg1.b - seg1.a;
    let d2 = seg2.b - seg2.a;
    let r = seg1.a - seg2.a;

    let a = d1.norm_squared();
    let e = d2.norm_squared();
    let f = d2.dot(&r);

    let mut s;
    let mut t;

    let _eps = DEFAULT_EPSILON;
    if a <= _eps && e <= _eps {
        s = 0.0;
        t = 0.0;
    } else if a <= _eps {
        s = 0.0;
        t = na::clamp(f / e, 0.0, 1.0);
    } else {
        let c = d1.dot(&r);
        if e <= _eps {
            t = 0.0;
            s = na::clamp(-c / a, 0.0, 1.0);
        } else {
            let b = d1.dot(&d2);
            let ae = a * e;
            let bb = b * b;
            let denom = ae - bb;

            // Use absolute and ulps error to test collinearity.
            if denom > _eps && !ulps_eq!(ae, bb) {
                s = na::clamp((b * f - c * e) / denom, 0.0, 1.0);
            } else {
                s = 0.0;
            }

            t = (b * s + f) / e;

            if t < 0.0 {
                t = 0.0;
                s = na::clamp(-c / a, 0.0, 1.0);
            } else if t > 1.0 {
                t = 1.0;
                s = na::clamp((b - c) / a, 0.0, 1.0);
            }
        }
    }

    (location_at(s), location_at(t))
}

fn location_at(param: Real) -> SegmentPointLocation {
    if param == 0.0 {
        SegmentPointLocation::OnVertex(0)
    } else if param == 1.0 {
        SegmentPointLocation::OnVertex(1)
    } else {
        SegmentPointLocation::OnEdge([1.0 - param, param])
    }
}

#[cfg(test)]
mod test {
    use super::{closest_points_segment_segment, closest_points_segment_segment_with_locations};
    use crate::math::Point;
    use crate::shape::{Segment, SegmentPointLocation};

    #[test]
    fn crossing_segments() {
        let seg1 = Segment::new(Point::new(-1.0, 0.0, 0.0), Point::new(1.0, 0.0, 0.0));
        let seg2 = Segment::new(Point::new(0.0, -1.0, 2.0), Point::new(0.0, 1.0, 2.0));
        let (p1, p2) = closest_points_segment_segment(&seg1, &seg2);
        assert_relative_eq!(p1, Point::origin());
        assert_relative_eq!(p2, Point::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn parallel_segments_pick_first_vertex() {
        let seg1 = Segment::new(Point::new(0.0, 0.0, 0.0), Point::new(1.0, 0.0, 0.0));
        let seg2 = Segment::new(Point::new(-2.0, 1.0, 0.0), Point::new(2.0, 1.0, 0.0));
        let (loc1, loc2) = closest_points_segment_segment_with_locations(&seg1, &seg2);
        assert_eq!(loc1, SegmentPointLocation::OnVertex(0));
        assert!(matches!(loc2, SegmentPointLocation::OnEdge(_)));
    }
}
