use crate::math::{Point, Real, UnitVector, Vector};
use crate::query::point::project_exterior_point_on_support_map;
use crate::query::{PointProjection, PointQuery};
use crate::shape::{ConvexPolyhedron, FeatureId};

impl ConvexPolyhedron {
    /// The face with the largest signed distance to `pt`, along with that distance.
    fn deepest_face(&self, pt: &Point<Real>) -> (usize, Real) {
        let mut best = (0, -Real::MAX);

        for i in 0..self.num_faces() {
            let (n, d) = self.face_plane(i);
            let dist = n.dot(&pt.coords) - d;
            if dist > best.1 {
                best = (i, dist);
            }
        }

        best
    }

    /// The smallest feature containing the boundary point `pt`.
    fn feature_at(&self, pt: &Point<Real>) -> FeatureId {
        let tolerance = self.local_aabb().extents().norm().max(1.0) * 1.0e-4;

        for i in 0..self.num_vertices() {
            if na::distance(&self.vertex(i), pt) <= tolerance {
                return FeatureId::Vertex(i as u32);
            }
        }

        for i in 0..self.num_edges() {
            if self.edge(i).distance_to_local_point(pt, true) <= tolerance {
                return FeatureId::Edge(i as u32);
            }
        }

        // The face whose plane passes the closest to the point.
        let mut best = (0, Real::MAX);
        for i in 0..self.num_faces() {
            let (n, d) = self.face_plane(i);
            let dist = (n.dot(&pt.coords) - d).abs();
            if dist < best.1 {
                best = (i, dist);
            }
        }

        FeatureId::Face(best.0 as u32)
    }

    /// Sum of the normals of the faces for which `incident` returns `true`.
    fn summed_face_normals(&self, incident: impl Fn(&[u32; 3]) -> bool) -> Vector<Real> {
        self.data()
            .faces()
            .iter()
            .enumerate()
            .filter(|(_, face)| incident(face))
            .fold(Vector::zeros(), |acc, (i, _)| acc + self.face_plane(i).0.into_inner())
    }
}

impl PointQuery for ConvexPolyhedron {
    fn project_local_point(&self, pt: &Point<Real>, solid: bool) -> PointProjection {
        let (face, dist) = self.deepest_face(pt);

        if dist <= 0.0 {
            if solid {
                PointProjection::new(true, *pt)
            } else {
                let (n, _) = self.face_plane(face);
                PointProjection::new(true, pt - n.into_inner() * dist)
            }
        } else {
            match project_exterior_point_on_support_map(self, pt) {
                Some(proj) => PointProjection::new(false, proj),
                // Too close to the boundary for GJK to separate it.
                None => {
                    let (n, _) = self.face_plane(face);
                    PointProjection::new(false, pt - n.into_inner() * dist)
                }
            }
        }
    }

    fn project_local_point_and_get_feature(
        &self,
        pt: &Point<Real>,
    ) -> (PointProjection, FeatureId) {
        let proj = self.project_local_point(pt, false);
        (proj, self.feature_at(&proj.point))
    }

    fn feature_normal(&self, feature: FeatureId) -> Option<UnitVector<Real>> {
        let normal = match feature {
            FeatureId::Face(i) if (i as usize) < self.num_faces() => {
                return Some(self.face_plane(i as usize).0)
            }
            FeatureId::Edge(i) if (i as usize) < self.num_edges() => {
                let [a, b] = self.data().edges()[i as usize];
                self.summed_face_normals(|f| f.contains(&a) && f.contains(&b))
            }
            FeatureId::Vertex(i) if (i as usize) < self.num_vertices() => {
                self.summed_face_normals(|f| f.contains(&i))
            }
            _ => return None,
        };

        UnitVector::try_new(normal, crate::math::DEFAULT_EPSILON)
    }
}
