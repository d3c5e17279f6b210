//! Penetration depth of two intersecting convex shapes using the Expanding Polytope Algorithm.

use crate::math::{Isometry, Point, Real, UnitVector, Vector, DEFAULT_EPSILON};
use crate::query::gjk::{self, CSOPoint, VoronoiSimplex};
use crate::query::PointQueryWithLocation;
use crate::shape::{SupportMap, Triangle, TrianglePointLocation};
use crate::utils;
use alloc::collections::BinaryHeap;
use alloc::vec::Vec;
use core::cmp::Ordering;
use na::Unit;

const MAX_ITERATIONS: usize = 100;

/// A face waiting for expansion. The face closest to the origin pops first.
#[derive(Copy, Clone, PartialEq)]
struct QueuedFace {
    face: usize,
    dist: Real,
}

impl QueuedFace {
    /// `None` if the plane of the face passes strictly beyond the origin.
    fn new(face: usize, dist: Real) -> Option<Self> {
        (dist >= -gjk::eps_tol()).then_some(QueuedFace { face, dist })
    }
}

impl Eq for QueuedFace {}

impl PartialOrd for QueuedFace {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedFace {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        other.dist.total_cmp(&self.dist)
    }
}

#[derive(Clone, Debug)]
struct Face {
    pts: [usize; 3],
    adj: [usize; 3],
    normal: UnitVector<Real>,
    bcoords: [Real; 3],
    deleted: bool,
}

impl Face {
    /// Builds a face and tells whether the origin projects inside of it.
    fn new(vertices: &[CSOPoint], pts: [usize; 3], adj: [usize; 3]) -> (Self, bool) {
        let [a, b, c] = pts.map(|i| vertices[i].point);
        // Degenerate faces get a zero normal and are visible from everywhere.
        let normal = utils::ccw_face_normal([&a, &b, &c])
            .unwrap_or_else(|| Unit::new_unchecked(Vector::zeros()));
        let (proj, loc) =
            Triangle::new(a, b, c).project_local_point_and_get_location(&Point::origin(), true);
        let tol = DEFAULT_EPSILON * 100.0;
        let touches_origin = proj.is_inside || proj.point.coords.norm_squared() < tol * tol;

        let (bcoords, origin_inside) = match loc {
            TrianglePointLocation::OnFace(_, bcoords) => (bcoords, true),
            TrianglePointLocation::OnSolid => ([1.0 / 3.0; 3], false),
            _ => (
                loc.barycentric_coordinates().unwrap_or([1.0, 0.0, 0.0]),
                touches_origin,
            ),
        };

        let face = Face {
            pts,
            adj,
            normal,
            bcoords,
            deleted: false,
        };
        (face, origin_inside)
    }

    /// The points on each shape matching the projection of the origin on this face.
    fn witnesses(&self, vertices: &[CSOPoint]) -> (Point<Real>, Point<Real>) {
        self.pts.iter().zip(self.bcoords).fold(
            (Point::origin(), Point::origin()),
            |(p1, p2), (&i, w)| {
                (p1 + vertices[i].orig1.coords * w, p2 + vertices[i].orig2.coords * w)
            },
        )
    }

    /// Local index of the vertex following `pt` in counter-clockwise order.
    fn next_ccw(&self, pt: usize) -> usize {
        match self.pts.iter().position(|&p| p == pt) {
            Some(i) => (i + 1) % 3,
            None => {
                log::debug!("EPA adjacency is broken: vertex {} not on face {:?}.", pt, self.pts);
                0
            }
        }
    }

    fn is_visible_from(&self, vertices: &[CSOPoint], pt: usize, opp: usize) -> bool {
        let corner = |k: usize| vertices[self.pts[(opp + k) % 3]].point;
        let pt = vertices[pt].point;

        (pt - corner(0)).dot(self.normal.as_ref()) >= -gjk::eps_tol()
            || Triangle::new(corner(1), corner(2), pt).is_affinely_dependent()
    }
}

/// An edge of the polytope separating a visible face from a hidden one.
#[derive(Copy, Clone)]
struct HorizonEdge {
    face: usize,
    opp: usize,
}

/// The Expanding Polytope Algorithm in 3D.
///
/// Keeps its buffers between calls so that it can be reused without
/// reallocating.
#[derive(Default)]
pub struct EPA {
    vertices: Vec<CSOPoint>,
    faces: Vec<Face>,
    horizon: Vec<HorizonEdge>,
    queue: BinaryHeap<QueuedFace>,
}

impl EPA {
    /// Creates a new instance of the 3D Expanding Polytope Algorithm.
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the penetration depth of `g1` and `g2` placed at `pos12` relative to `g1`.
    ///
    /// `simplex` must be the final state of a GJK run that found an
    /// intersection. Returns the witness points on each shape, in the local
    /// frame of `g1`, and the penetration direction, pointing from `g1`
    /// toward `g2` once the shapes are separated along it.
    ///
    /// Returns `None` if the polytope could not be expanded.
    pub fn closest_points<G1, G2>(
        &mut self,
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
        simplex: &VoronoiSimplex,
    ) -> Option<(Point<Real>, Point<Real>, UnitVector<Real>)>
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        self.vertices.clear();
        self.faces.clear();
        self.horizon.clear();
        self.queue.clear();
        self.vertices.extend((0..=simplex.dimension()).map(|i| *simplex.point(i)));

        match simplex.dimension() {
            0 => {
                // Touching at a single point: any direction is as good.
                let pt = self.vertices[0];
                return Some((pt.orig1, pt.orig2, Vector::y_axis()));
            }
            3 => self.init_tetrahedron()?,
            _ => {
                if self.grow_to_tetrahedron(pos12, g1, g2).is_none() {
                    log::debug!("EPA failed to grow the simplex into a tetrahedron.");
                    return None;
                }

                self.init_tetrahedron()?
            }
        }

        self.expand(pos12, g1, g2)
    }

    fn init_tetrahedron(&mut self) -> Option<()> {
        let [e1, e2, e3] = [1, 2, 3].map(|i| self.vertices[i] - self.vertices[0]);

        if e1.cross(&e2).dot(&e3) > 0.0 {
            self.vertices.swap(1, 2)
        }

        let faces = [[0, 1, 2], [1, 3, 2], [0, 2, 3], [0, 3, 1]];
        let adjs = [[3, 1, 2], [3, 2, 0], [0, 1, 3], [2, 1, 0]];
        let mut origin_projected = false;

        for (id, (pts, adj)) in faces.into_iter().zip(adjs).enumerate() {
            if self.push_face(pts, adj) {
                origin_projected = true;
                let dist = self.face_distance(id);
                self.queue.push(QueuedFace::new(id, dist)?);
            }
        }

        if !origin_projected {
            log::debug!("EPA failed to project the origin on the initial simplex.");
            return None;
        }

        Some(())
    }

    /// Completes a segment or triangle simplex into a tetrahedron enclosing the origin.
    fn grow_to_tetrahedron<G1, G2>(
        &mut self,
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
    ) -> Option<()>
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        if self.vertices.len() == 2 {
            let [a, b] = [self.vertices[0].point, self.vertices[1].point];
            let axis = Unit::try_new(b - a, DEFAULT_EPSILON)?;
            let [u, v] = utils::orthonormal_basis(&axis);
            let third = [*u, -*u, *v, -*v]
                .iter()
                .map(|dir| CSOPoint::from_shapes(pos12, g1, g2, dir))
                .find(|pt| !Triangle::new(a, b, pt.point).is_affinely_dependent())?;
            self.vertices.push(third);
        }

        let [a, b, c] = [0, 1, 2].map(|i| self.vertices[i].point);
        let normal = Triangle::new(a, b, c)
            .scaled_normal()
            .try_normalize(DEFAULT_EPSILON)?;
        // Look on the side of the triangle containing the origin first.
        let dirs = if a.coords.dot(&normal) > 0.0 {
            [-normal, normal]
        } else {
            [normal, -normal]
        };
        let apex = dirs
            .iter()
            .map(|dir| CSOPoint::from_shapes(pos12, g1, g2, dir))
            .find(|pt| (pt.point - a).dot(&normal).abs() > gjk::eps_tol())?;
        self.vertices.push(apex);

        Some(())
    }

    fn expand<G1, G2>(
        &mut self,
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
    ) -> Option<(Point<Real>, Point<Real>, UnitVector<Real>)>
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        let tol = DEFAULT_EPSILON * 100.0;
        let mut best = *self.queue.peek()?;
        let mut upper_bound = Real::MAX;
        let mut expansions = 0;

        while let Some(queued) = self.queue.pop() {
            let face = self.faces[queued.face].clone();

            if face.deleted {
                continue;
            }

            let support = CSOPoint::from_shapes(pos12, g1, g2, &face.normal);
            let support_id = self.vertices.len();
            self.vertices.push(support);

            let support_dist = support.point.coords.dot(face.normal.as_ref());

            if support_dist < upper_bound {
                best = queued;
                upper_bound = support_dist;
            }

            if upper_bound - queued.dist < tol {
                return Some(self.face_result(best.face));
            }

            self.faces[queued.face].deleted = true;

            for k in 0..3 {
                let opp = self.faces[face.adj[k]].next_ccw(face.pts[k]);
                self.carve_horizon(support_id, face.adj[k], opp);
            }

            if self.horizon.is_empty() {
                log::debug!("EPA failed to extract a horizon.");
                return None;
            }

            let first_new_face = self.faces.len();

            for e in 0..self.horizon.len() {
                let HorizonEdge { face: edge_face, opp } = self.horizon[e];

                if self.faces[edge_face].deleted {
                    continue;
                }

                let new_face = self.faces.len();
                let edge_pts = self.faces[edge_face].pts;
                self.faces[edge_face].adj[(opp + 1) % 3] = new_face;

                let pts = [edge_pts[(opp + 2) % 3], edge_pts[(opp + 1) % 3], support_id];
                let adj = [edge_face, new_face + 1, new_face - 1];

                if self.push_face(pts, adj) {
                    let dist = self.face_distance(new_face);

                    if dist < queued.dist {
                        // Rounding errors made the polytope non-convex.
                        let (p1, p2) = face.witnesses(&self.vertices);
                        return Some((p1, p2, face.normal));
                    }

                    self.queue.push(QueuedFace::new(new_face, dist)?);
                }
            }

            if first_new_face == self.faces.len() {
                log::debug!("EPA horizon only contained deleted faces.");
                return None;
            }

            // Close the fan of new faces.
            let last_new_face = self.faces.len() - 1;
            self.faces[first_new_face].adj[2] = last_new_face;
            self.faces[last_new_face].adj[1] = first_new_face;
            self.horizon.clear();

            expansions += 1;
            if expansions > MAX_ITERATIONS {
                break;
            }
        }

        Some(self.face_result(best.face))
    }

    fn push_face(&mut self, pts: [usize; 3], adj: [usize; 3]) -> bool {
        let (face, origin_inside) = Face::new(&self.vertices, pts, adj);
        self.faces.push(face);
        origin_inside
    }

    fn face_distance(&self, id: usize) -> Real {
        let face = &self.faces[id];
        face.normal.dot(&self.vertices[face.pts[0]].point.coords)
    }

    fn face_result(&self, id: usize) -> (Point<Real>, Point<Real>, UnitVector<Real>) {
        let face = &self.faces[id];
        let (p1, p2) = face.witnesses(&self.vertices);
        (p1, p2, face.normal)
    }

    /// Deletes the faces visible from `pt`, starting at `face`, and records
    /// the edges bounding them.
    fn carve_horizon(&mut self, pt: usize, face: usize, opp: usize) {
        if self.faces[face].deleted {
            return;
        }

        if !self.faces[face].is_visible_from(&self.vertices, pt, opp) {
            self.horizon.push(HorizonEdge { face, opp });
            return;
        }

        self.faces[face].deleted = true;

        for local in [(opp + 2) % 3, opp] {
            let neighbor = self.faces[face].adj[local];
            let neighbor_opp = self.faces[neighbor].next_ccw(self.faces[face].pts[local]);
            self.carve_horizon(pt, neighbor, neighbor_opp);
        }
    }
}

#[cfg(test)]
mod test {
    use super::EPA;
    use crate::math::{Isometry, Real, Vector};
    use crate::query::gjk::{self, CSOPoint, GJKResult, VoronoiSimplex};
    use crate::shape::{Ball, Cuboid, SupportMap};

    fn penetration(
        pos12: &Isometry<Real>,
        g1: &impl SupportMap,
        g2: &impl SupportMap,
    ) -> (Real, Vector<Real>) {
        let mut simplex = VoronoiSimplex::new();
        simplex.reset(CSOPoint::from_shapes(pos12, g1, g2, &Vector::x()));
        let res = gjk::closest_points(pos12, g1, g2, &mut simplex);
        assert_eq!(res, GJKResult::Intersection);

        let (p1, p2, n) = EPA::new().closest_points(pos12, g1, g2, &simplex).unwrap();
        ((p1 - p2).dot(&n), n.into_inner())
    }

    #[test]
    fn epa_finds_the_penetration_depth_of_overlapping_cuboids() {
        let c = Cuboid::new(Vector::repeat(1.0));
        let (depth, n) = penetration(&Isometry::translation(1.5, 0.1, 0.2), &c, &c);
        assert_relative_eq!(n, Vector::x(), epsilon = 1.0e-4);
        assert_relative_eq!(depth, 0.5, epsilon = 1.0e-4);
    }

    #[test]
    fn epa_on_a_ball_inside_a_cuboid() {
        let c = Cuboid::new(Vector::new(2.0, 1.0, 2.0));
        let b = Ball::new(0.5);
        let (depth, n) = penetration(&Isometry::translation(0.0, 0.8, 0.0), &c, &b);
        assert_relative_eq!(n, Vector::y(), epsilon = 1.0e-2);
        assert_relative_eq!(depth, 0.7, epsilon = 1.0e-2);
    }

    /// Runs EPA from a simplex made of the support points along `dirs`.
    fn penetration_from_simplex(
        pos12: &Isometry<Real>,
        g1: &impl SupportMap,
        g2: &impl SupportMap,
        dirs: &[Vector<Real>],
    ) -> (Real, Vector<Real>) {
        let mut simplex = VoronoiSimplex::new();
        simplex.reset(CSOPoint::from_shapes(pos12, g1, g2, &dirs[0]));
        for dir in &dirs[1..] {
            assert!(simplex.add_point(CSOPoint::from_shapes(pos12, g1, g2, dir)));
        }
        assert_eq!(simplex.dimension(), dirs.len() - 1);

        let (p1, p2, n) = EPA::new().closest_points(pos12, g1, g2, &simplex).unwrap();
        ((p1 - p2).dot(&n), n.into_inner())
    }

    #[test]
    fn epa_grows_degenerate_simplices() {
        let c = Cuboid::new(Vector::repeat(1.0));
        let pos12 = Isometry::translation(1.5, 0.0, 0.0);
        // The support points along these directions are (0.5, 0, 0), (-3.5, 0, 0),
        // (-1.5, 2, 0) and (-3.5, -2, 2): the segment and the triangle both
        // pass through the origin.
        let all_dirs = [
            Vector::x(),
            -Vector::x(),
            Vector::y(),
            Vector::new(-1.0, -1.0, 1.0),
        ];

        for dim in 1..=3 {
            let (depth, n) = penetration_from_simplex(&pos12, &c, &c, &all_dirs[..=dim]);
            assert_relative_eq!(n, Vector::x(), epsilon = 1.0e-4);
            assert_relative_eq!(depth, 0.5, epsilon = 1.0e-4);
        }
    }

    #[test]
    fn epa_grows_a_segment_between_flat_cuboids() {
        let c1 = Cuboid::new(Vector::new(2.0, 1.0, 2.0));
        let c2 = Cuboid::new(Vector::new(1.0, 1.0, 1.0));
        let pos12 = Isometry::translation(0.0, 1.5, 0.0);
        // (1, 0.5, 1) and (1, -3.5, 1).
        let dirs = [Vector::y(), -Vector::y()];
        let (depth, n) = penetration_from_simplex(&pos12, &c1, &c2, &dirs);
        assert_relative_eq!(n, Vector::y(), epsilon = 1.0e-4);
        assert_relative_eq!(depth, 0.5, epsilon = 1.0e-4);
    }
}
