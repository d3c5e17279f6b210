use crate::math::{Point, Real};
use crate::query::gjk::{self, CSOPoint};
use crate::query::{PointProjection, PointQueryWithLocation};
use crate::shape::{Segment, SegmentPointLocation, Triangle, TrianglePointLocation};

/// A simplex of dimension up to 3 that uses Voronoï regions for computing point projections.
///
/// The previous state of the simplex (before the last reduction) is kept so
/// that witness points can be recovered when GJK stops because of a lack of
/// progress.
#[derive(Clone, Debug)]
pub struct VoronoiSimplex {
    prev_vertices: [usize; 4],
    prev_dim: usize,
    prev_proj: [Real; 4],

    vertices: [CSOPoint; 4],
    proj: [Real; 4],
    dim: usize,
}

impl Default for VoronoiSimplex {
    fn default() -> Self {
        Self::new()
    }
}

const TETRAHEDRON_FACES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
const TETRAHEDRON_OPPOSITE_VERTEX: [usize; 4] = [3, 2, 1, 0];

impl VoronoiSimplex {
    /// Creates a new empty simplex.
    pub fn new() -> VoronoiSimplex {
        VoronoiSimplex {
            prev_vertices: [0, 1, 2, 3],
            prev_proj: [0.0; 4],
            prev_dim: 0,
            vertices: [CSOPoint::origin(); 4],
            proj: [0.0; 4],
            dim: 0,
        }
    }

    /// Resets this simplex to a single point.
    pub fn reset(&mut self, pt: CSOPoint) {
        self.prev_dim = 0;
        self.dim = 0;
        self.proj[0] = 1.0;
        self.vertices[0] = pt;
    }

    /// Add a point to this simplex.
    ///
    /// Returns `false` if the point is too close to one of the current vertices.
    pub fn add_point(&mut self, pt: CSOPoint) -> bool {
        self.prev_dim = self.dim;
        self.prev_proj = self.proj;
        self.prev_vertices = [0, 1, 2, 3];

        for i in 0..self.dim + 1 {
            if (self.vertices[i].point - pt.point).norm_squared() < gjk::eps_tol() {
                return false;
            }
        }

        self.dim += 1;
        self.vertices[self.dim] = pt;
        true
    }

    /// Retrieves the barycentric coordinate associated to the `i`-th by the last call to `project_origin_and_reduce`.
    pub fn proj_coord(&self, i: usize) -> Real {
        assert!(i <= self.dim, "Index out of bounds.");
        self.proj[i]
    }

    /// The i-th point of this simplex.
    pub fn point(&self, i: usize) -> &CSOPoint {
        assert!(i <= self.dim, "Index out of bounds.");
        &self.vertices[i]
    }

    /// Retrieves the barycentric coordinate associated to the `i`-th before the last call to `project_origin_and_reduce`.
    pub fn prev_proj_coord(&self, i: usize) -> Real {
        assert!(i <= self.prev_dim, "Index out of bounds.");
        self.prev_proj[i]
    }

    /// The i-th point of the simplex before the last call to `project_origin_and_reduce`.
    pub fn prev_point(&self, i: usize) -> &CSOPoint {
        assert!(i <= self.prev_dim, "Index out of bounds.");
        &self.vertices[self.prev_vertices[i]]
    }

    /// Keeps only the vertices `ids` (in this order) with the barycentric coordinates `coords`.
    ///
    /// The discarded vertices are moved after the kept ones so that the
    /// previous simplex remains accessible.
    fn reduce(&mut self, ids: &[usize], coords: &[Real]) {
        let mut perm = [0; 4];
        let mut len = 0;

        for id in ids {
            perm[len] = *id;
            len += 1;
        }

        for id in 0..4 {
            if !ids.contains(&id) {
                perm[len] = id;
                len += 1;
            }
        }

        let mut inv_perm = [0; 4];
        let mut vertices = self.vertices;

        for (new_id, old_id) in perm.iter().enumerate() {
            vertices[new_id] = self.vertices[*old_id];
            inv_perm[*old_id] = new_id;
        }

        self.vertices = vertices;

        for prev in &mut self.prev_vertices {
            *prev = inv_perm[*prev];
        }

        self.proj[..coords.len()].copy_from_slice(coords);
        self.dim = ids.len() - 1;
    }

    /// Reduces the simplex to the triangle feature `loc` of the face made of the vertices `face`.
    fn reduce_to_triangle_feature(&mut self, face: [usize; 3], loc: &TrianglePointLocation) {
        match loc {
            TrianglePointLocation::OnVertex(i) => self.reduce(&[face[*i as usize]], &[1.0]),
            TrianglePointLocation::OnEdge(i, coords) => {
                let i = *i as usize;
                self.reduce(&[face[i], face[(i + 1) % 3]], coords)
            }
            TrianglePointLocation::OnFace(_, coords) => self.reduce(&face, coords),
            TrianglePointLocation::OnSolid => {
                self.reduce(&face, &[1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0])
            }
        }
    }

    /// Computes the projection of the origin on the simplex and removes the
    /// vertices that do not take part in the projection.
    pub fn project_origin_and_reduce(&mut self) -> Point<Real> {
        let origin = Point::origin();

        match self.dim {
            0 => {
                self.proj[0] = 1.0;
                self.vertices[0].point
            }
            1 => {
                let seg = Segment::new(self.vertices[0].point, self.vertices[1].point);
                let (proj, location) = seg.project_local_point_and_get_location(&origin, true);

                match location {
                    SegmentPointLocation::OnVertex(i) => self.reduce(&[i as usize], &[1.0]),
                    SegmentPointLocation::OnEdge(coords) => self.proj[..2].copy_from_slice(&coords),
                }

                proj.point
            }
            2 => {
                let tri = Triangle::new(
                    self.vertices[0].point,
                    self.vertices[1].point,
                    self.vertices[2].point,
                );
                let (proj, location) = tri.project_local_point_and_get_location(&origin, true);
                self.reduce_to_triangle_feature([0, 1, 2], &location);
                proj.point
            }
            _ => self.project_origin_on_tetrahedron_and_reduce(),
        }
    }

    fn project_origin_on_tetrahedron_and_reduce(&mut self) -> Point<Real> {
        let origin = Point::origin();
        let pts = [
            self.vertices[0].point,
            self.vertices[1].point,
            self.vertices[2].point,
            self.vertices[3].point,
        ];
        let mut best: Option<(Real, usize, PointProjection, TrianglePointLocation)> = None;

        for (fid, face) in TETRAHEDRON_FACES.iter().enumerate() {
            let a = pts[face[0]];
            let n = (pts[face[1]] - a).cross(&(pts[face[2]] - a));
            let sign_origin = n.dot(&(origin - a));
            let sign_opposite = n.dot(&(pts[TETRAHEDRON_OPPOSITE_VERTEX[fid]] - a));

            // The origin can only project on faces it lies in front of.
            if sign_origin * sign_opposite <= 0.0 {
                let tri = Triangle::new(a, pts[face[1]], pts[face[2]]);
                let (proj, loc) = tri.project_local_point_and_get_location(&origin, true);
                let dist = proj.point.coords.norm_squared();

                if best.as_ref().map(|b| dist < b.0).unwrap_or(true) {
                    best = Some((dist, fid, proj, loc));
                }
            }
        }

        match best {
            Some((_, fid, proj, loc)) => {
                self.reduce_to_triangle_feature(TETRAHEDRON_FACES[fid], &loc);
                proj.point
            }
            None => {
                // The origin is inside of the tetrahedron.
                let e1 = pts[1] - pts[0];
                let e2 = pts[2] - pts[0];
                let e3 = pts[3] - pts[0];
                let o = origin - pts[0];
                let det = e1.dot(&e2.cross(&e3));

                if det != 0.0 {
                    let b1 = o.dot(&e2.cross(&e3)) / det;
                    let b2 = e1.dot(&o.cross(&e3)) / det;
                    let b3 = e1.dot(&e2.cross(&o)) / det;
                    self.proj = [1.0 - b1 - b2 - b3, b1, b2, b3];
                }

                origin
            }
        }
    }

    /// The dimension of the smallest subspace that can contain this simplex.
    pub fn dimension(&self) -> usize {
        self.dim
    }

    /// The dimension of the simplex before the last call to `project_origin_and_reduce`.
    pub fn prev_dimension(&self) -> usize {
        self.prev_dim
    }

    /// Apply a function to all the vertices of this simplex.
    pub fn modify_pnts(&mut self, f: &dyn Fn(&mut CSOPoint)) {
        for i in 0..self.dim + 1 {
            f(&mut self.vertices[i])
        }
    }
}
