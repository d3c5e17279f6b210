use crate::math::{Point, Real};
use crate::query::closest_points::closest_points_segment_segment_with_locations;
use crate::query::PointQueryWithLocation;
use crate::shape::{Segment, SegmentPointLocation, Triangle, TrianglePointLocation};

/// The parameter and point where `seg` crosses the interior or boundary of `tri`.
///
/// Returns `None` if they do not intersect, or if the segment lies in the
/// triangle plane.
pub fn segment_triangle_intersection(seg: &Segment, tri: &Triangle) -> Option<(Real, Point<Real>)> {
    let n = tri.scaled_normal();
    let da = (seg.a - tri.a).dot(&n);
    let db = (seg.b - tri.a).dot(&n);

    if da * db > 0.0 || da == db {
        return None;
    }

    let t = da / (da - db);
    let pt = seg.a + (seg.b - seg.a) * t;

    for edge in tri.edges() {
        if (edge.b - edge.a).cross(&(pt - edge.a)).dot(&n) < 0.0 {
            return None;
        }
    }

    Some((t, pt))
}

fn edge_location_on_triangle(edge: usize, loc: SegmentPointLocation) -> TrianglePointLocation {
    match loc {
        SegmentPointLocation::OnVertex(0) => TrianglePointLocation::OnVertex(edge as u32),
        SegmentPointLocation::OnVertex(_) => TrianglePointLocation::OnVertex((edge as u32 + 1) % 3),
        SegmentPointLocation::OnEdge(bcoords) => {
            TrianglePointLocation::OnEdge(edge as u32, bcoords)
        }
    }
}

/// Closest points between a segment and a triangle expressed in the same frame.
///
/// Returns the points on the segment and on the triangle, with their locations.
pub fn closest_points_segment_triangle(
    seg: &Segment,
    tri: &Triangle,
) -> (
    Point<Real>,
    Point<Real>,
    SegmentPointLocation,
    TrianglePointLocation,
) {
    if let Some((t, pt)) = segment_triangle_intersection(seg, tri) {
        let seg_loc = if t == 0.0 {
            SegmentPointLocation::OnVertex(0)
        } else if t == 1.0 {
            SegmentPointLocation::OnVertex(1)
        } else {
            SegmentPointLocation::OnEdge([1.0 - t, t])
        };
        let (_, tri_loc) = tri.project_local_point_and_get_location(&pt, true);
        return (pt, pt, seg_loc, tri_loc);
    }

    let mut best = None;
    let mut best_dist = Real::MAX;

    for (i, endpoint) in [seg.a, seg.b].iter().enumerate() {
        let (proj, tri_loc) = tri.project_local_point_and_get_location(endpoint, true);
        let dist = na::distance_squared(endpoint, &proj.point);

        if dist < best_dist {
            best_dist = dist;
            best = Some((
                *endpoint,
                proj.point,
                SegmentPointLocation::OnVertex(i as u32),
                tri_loc,
            ));
        }
    }

    for (k, edge) in tri.edges().iter().enumerate() {
        let (loc1, loc2) = closest_points_segment_segment_with_locations(seg, edge);
        let p1 = seg.point_at(&loc1);
        let p2 = edge.point_at(&loc2);
        let dist = na::distance_squared(&p1, &p2);

        if dist < best_dist {
            best_dist = dist;
            best = Some((p1, p2, loc1, edge_location_on_triangle(k, loc2)));
        }
    }

    best.unwrap_or((
        seg.a,
        tri.a,
        SegmentPointLocation::OnVertex(0),
        TrianglePointLocation::OnVertex(0),
    ))
}
