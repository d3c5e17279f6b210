use crate::math::{Point, Real, UnitVector};
use crate::query::{PointProjection, PointQuery, PointQueryWithLocation};
use crate::shape::{FeatureId, Triangle, TrianglePointLocation};

impl PointQuery for Triangle {
    #[inline]
    fn project_local_point(&self, pt: &Point<Real>, solid: bool) -> PointProjection {
        self.project_local_point_and_get_location(pt, solid).0
    }

    #[inline]
    fn project_local_point_and_get_feature(
        &self,
        pt: &Point<Real>,
    ) -> (PointProjection, FeatureId) {
        let (proj, loc) = self.project_local_point_and_get_location(pt, false);
        let feature = match loc {
            TrianglePointLocation::OnVertex(i) => FeatureId::Vertex(i),
            TrianglePointLocation::OnEdge(i, _) => FeatureId::Edge(i),
            TrianglePointLocation::OnFace(i, _) => FeatureId::Face(i),
            TrianglePointLocation::OnSolid => FeatureId::Face(0),
        };

        (proj, feature)
    }

    fn feature_normal(&self, feature: FeatureId) -> Option<UnitVector<Real>> {
        let normal = self.normal()?;
        match feature {
            FeatureId::Face(1) => Some(-normal),
            FeatureId::Unknown => None,
            _ => Some(normal),
        }
    }
}

impl PointQueryWithLocation for Triangle {
    type Location = TrianglePointLocation;

    // Closest point on a triangle, see "Real-Time Collision Detection", Christer Ericson, §5.1.5.
    fn project_local_point_and_get_location(
        &self,
        pt: &Point<Real>,
        _: bool,
    ) -> (PointProjection, Self::Location) {
        let a = self.a;
        let b = self.b;
        let c = self.c;

        let ab = b - a;
        let ac = c - a;
        let ap = pt - a;

        let d1 = ab.dot(&ap);
        let d2 = ac.dot(&ap);

        let on_vertex = |i: u32, proj: Point<Real>| {
            (
                PointProjection::new(relative_eq!(proj, *pt), proj),
                TrianglePointLocation::OnVertex(i),
            )
        };
        let on_edge = |i: u32, proj: Point<Real>, bcoords: [Real; 2]| {
            (
                PointProjection::new(relative_eq!(proj, *pt), proj),
                TrianglePointLocation::OnEdge(i, bcoords),
            )
        };

        if d1 <= 0.0 && d2 <= 0.0 {
            return on_vertex(0, a);
        }

        let bp = pt - b;
        let d3 = ab.dot(&bp);
        let d4 = ac.dot(&bp);

        if d3 >= 0.0 && d4 <= d3 {
            return on_vertex(1, b);
        }

        let cp = pt - c;
        let d5 = ab.dot(&cp);
        let d6 = ac.dot(&cp);

        if d6 >= 0.0 && d5 <= d6 {
            return on_vertex(2, c);
        }

        let vc = d1 * d4 - d3 * d2;
        if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
            let v = if d1 - d3 > 0.0 { d1 / (d1 - d3) } else { 0.0 };
            return on_edge(0, a + ab * v, [1.0 - v, v]);
        }

        let vb = d5 * d2 - d1 * d6;
        if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
            let w = if d2 - d6 > 0.0 { d2 / (d2 - d6) } else { 0.0 };
            // Edge 2 goes from `c` to `a`.
            return on_edge(2, a + ac * w, [w, 1.0 - w]);
        }

        let va = d3 * d6 - d5 * d4;
        let d43 = d4 - d3;
        let d56 = d5 - d6;
        if va <= 0.0 && d43 >= 0.0 && d56 >= 0.0 {
            let w = if d43 + d56 > 0.0 { d43 / (d43 + d56) } else { 0.0 };
            return on_edge(1, b + (c - b) * w, [1.0 - w, w]);
        }

        let denom = va + vb + vc;

        if denom <= Real::EPSILON * (ab.norm_squared() * ac.norm_squared()) {
            // Degenerate triangle: fall back to the closest edge.
            let mut best = None;
            let mut best_dist = Real::MAX;

            for (i, edge) in self.edges().iter().enumerate() {
                let (proj, loc) = edge.project_local_point_and_get_location(pt, false);
                let dist = na::distance_squared(&proj.point, pt);
                if dist < best_dist {
                    best_dist = dist;
                    best = Some(on_edge(i as u32, proj.point, loc.barycentric_coordinates()));
                }
            }

            if let Some(best) = best {
                return best;
            }
        }

        let v = vb / denom;
        let w = vc / denom;
        let proj = a + ab * v + ac * w;
        let face = if (pt - proj).dot(&self.scaled_normal()) >= 0.0 {
            0
        } else {
            1
        };

        (
            PointProjection::new(relative_eq!(proj, *pt), proj),
            TrianglePointLocation::OnFace(face, [1.0 - v - w, v, w]),
        )
    }
}
