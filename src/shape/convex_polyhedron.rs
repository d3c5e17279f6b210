use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, UnitVector, Vector};
use crate::shape::error::validate_scale;
use crate::shape::{Segment, ShapeError, SupportMap};
use crate::utils;

/// Adjacent faces whose normals have a dot product above `1 - COPLANARITY_EPSILON`
/// are considered coplanar.
const COPLANARITY_EPSILON: Real = 1.0e-5;

/// The immutable geometry of a convex polyhedron.
///
/// It is meant to be built once, wrapped into an `Arc`, and shared by every
/// [`ConvexPolyhedron`] using it.
#[derive(PartialEq, Debug, Clone)]
pub struct ConvexPolyhedronData {
    points: Vec<Point<Real>>,
    faces: Vec<[u32; 3]>,
    face_normals: Vec<UnitVector<Real>>,
    edges: Vec<[u32; 2]>,
    center: Point<Real>,
    aabb: Aabb,
}

impl ConvexPolyhedronData {
    /// Builds the geometry of a convex polyhedron from its vertices and its
    /// counter-clockwise triangular faces.
    ///
    /// Fails if the mesh is not a closed convex polyhedron within a small
    /// tolerance, or if one of its faces is degenerate.
    pub fn from_convex_mesh(
        points: Vec<Point<Real>>,
        indices: &[[u32; 3]],
    ) -> Result<Self, ShapeError> {
        if points.len() < 4 || indices.len() < 4 {
            return Err(ShapeError::NotEnoughVertices);
        }

        let aabb = Aabb::from_points(&points);
        let tolerance = 1.0e-4 * aabb.extents().norm().max(1.0);
        let mut face_normals = Vec::with_capacity(indices.len());
        let mut edges = Vec::with_capacity(indices.len() * 3);

        for (i, face) in indices.iter().enumerate() {
            for idx in face {
                if *idx as usize >= points.len() {
                    return Err(ShapeError::IndexOutOfBounds {
                        index: *idx,
                        len: points.len(),
                    });
                }
            }

            let [a, b, c] = face.map(|idx| &points[idx as usize]);
            let normal = utils::ccw_face_normal([a, b, c]).ok_or(ShapeError::DegenerateFace(i))?;

            for (vid, pt) in points.iter().enumerate() {
                if (pt - a).dot(normal.as_ref()) > tolerance {
                    return Err(ShapeError::NotConvex {
                        face: i,
                        vertex: vid,
                    });
                }
            }

            face_normals.push(normal);
            for k in 0..3 {
                let (v1, v2) = (face[k], face[(k + 1) % 3]);
                edges.push([v1.min(v2), v1.max(v2)]);
            }
        }

        edges.sort_unstable();
        edges.dedup();
        // Diagonals splitting a flat face into triangles are not features.
        edges.retain(|&[v1, v2]| {
            let mut normals = indices
                .iter()
                .zip(&face_normals)
                .filter(|(face, _)| face.contains(&v1) && face.contains(&v2))
                .map(|(_, n)| n);

            match (normals.next(), normals.next()) {
                (Some(n1), Some(n2)) => n1.dot(n2.as_ref()) < 1.0 - COPLANARITY_EPSILON,
                _ => true,
            }
        });

        let center = Point::from(
            points.iter().map(|pt| pt.coords).sum::<Vector<Real>>() / points.len() as Real,
        );

        Ok(Self {
            points,
            faces: indices.to_vec(),
            face_normals,
            edges,
            center,
            aabb,
        })
    }

    /// The vertices of this polyhedron.
    pub fn points(&self) -> &[Point<Real>] {
        &self.points
    }

    /// The triangular faces of this polyhedron.
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// The outward unit normals of the faces of this polyhedron.
    pub fn face_normals(&self) -> &[UnitVector<Real>] {
        &self.face_normals
    }

    /// The unique edges of this polyhedron, as sorted vertex index pairs.
    ///
    /// Edges shared by two coplanar faces are left out.
    pub fn edges(&self) -> &[[u32; 2]] {
        &self.edges
    }
}

/// A convex polyhedron referencing shared immutable geometry, with a local scale.
#[derive(PartialEq, Debug, Clone)]
pub struct ConvexPolyhedron {
    data: Arc<ConvexPolyhedronData>,
    scale: Vector<Real>,
}

impl ConvexPolyhedron {
    /// Creates an unscaled convex polyhedron sharing the given geometry.
    pub fn new(data: Arc<ConvexPolyhedronData>) -> Self {
        Self {
            data,
            scale: Vector::repeat(1.0),
        }
    }

    /// Builds a convex polyhedron with its own geometry blob.
    pub fn from_convex_mesh(
        points: Vec<Point<Real>>,
        indices: &[[u32; 3]],
    ) -> Result<Self, ShapeError> {
        ConvexPolyhedronData::from_convex_mesh(points, indices).map(|d| Self::new(Arc::new(d)))
    }

    /// This polyhedron with a different local scale.
    pub fn with_scale(mut self, scale: Vector<Real>) -> Result<Self, ShapeError> {
        validate_scale(&scale)?;
        self.scale = scale;
        Ok(self)
    }

    /// The shared geometry of this polyhedron.
    pub fn data(&self) -> &Arc<ConvexPolyhedronData> {
        &self.data
    }

    /// The local scale applied to the shared geometry.
    pub fn scale(&self) -> &Vector<Real> {
        &self.scale
    }

    /// The number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.data.points.len()
    }

    /// The number of faces.
    pub fn num_faces(&self) -> usize {
        self.data.faces.len()
    }

    /// The number of unique edges.
    pub fn num_edges(&self) -> usize {
        self.data.edges.len()
    }

    /// The scaled vertex `i`.
    #[inline]
    pub fn vertex(&self, i: usize) -> Point<Real> {
        self.data.points[i].coords.component_mul(&self.scale).into()
    }

    /// The scaled edge `i`.
    pub fn edge(&self, i: usize) -> Segment {
        let [a, b] = self.data.edges[i];
        Segment::new(self.vertex(a as usize), self.vertex(b as usize))
    }

    /// The plane of the scaled face `i`, as its outward normal `n` and the
    /// offset `d` such that `n.dot(x) == d` for any `x` on the plane.
    pub fn face_plane(&self, i: usize) -> (UnitVector<Real>, Real) {
        let n = self.data.face_normals[i];
        let p = self.data.points[self.data.faces[i][0] as usize];
        let scaled_n = n.component_div(&self.scale);
        let inv_norm = 1.0 / scaled_n.norm();
        (
            UnitVector::new_unchecked(scaled_n * inv_norm),
            n.dot(&p.coords) * inv_norm,
        )
    }

    /// The AABB of this polyhedron in its local frame.
    pub fn local_aabb(&self) -> Aabb {
        self.data.aabb.scaled(&self.scale)
    }
}

impl SupportMap for ConvexPolyhedron {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        let unscaled_dir = dir.component_mul(&self.scale);
        let id = utils::point_cloud_support_point_id(&unscaled_dir, &self.data.points);
        self.vertex(id)
    }

    fn local_interior_point(&self) -> Point<Real> {
        self.data.center.coords.component_mul(&self.scale).into()
    }
}

/// An axis-aligned cube with vertices at `±1`, for tests.
#[cfg(test)]
pub(crate) fn unit_cube() -> ConvexPolyhedron {
    let pts = (0..8)
        .map(|i| {
            Point::new(
                if i & 1 != 0 { 1.0 } else { -1.0 },
                if i & 2 != 0 { 1.0 } else { -1.0 },
                if i & 4 != 0 { 1.0 } else { -1.0 },
            )
        })
        .collect();
    let faces = [
        [0, 6, 2], [0, 4, 6], // -x
        [1, 7, 5], [1, 3, 7], // +x
        [0, 5, 4], [0, 1, 5], // -y
        [2, 7, 3], [2, 6, 7], // +y
        [0, 3, 1], [0, 2, 3], // -z
        [4, 7, 6], [4, 5, 7], // +z
    ];
    ConvexPolyhedron::from_convex_mesh(pts, &faces).unwrap()
}

#[cfg(test)]
mod test {
    use super::ConvexPolyhedron;
    use crate::math::{Point, Vector};
    use crate::shape::{ShapeError, SupportMap};

    fn tetrahedron() -> (alloc::vec::Vec<Point<crate::math::Real>>, [[u32; 3]; 4]) {
        let pts = alloc::vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
        ];
        let idx = [[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];
        (pts, idx)
    }

    #[test]
    fn scaled_support_and_planes() {
        let (pts, idx) = tetrahedron();
        let hull = ConvexPolyhedron::from_convex_mesh(pts, &idx)
            .unwrap()
            .with_scale(Vector::new(2.0, 1.0, 1.0))
            .unwrap();

        assert_eq!(hull.local_support_point(&Vector::x()), Point::new(2.0, 0.0, 0.0));

        // Every scaled vertex must lie on or behind every scaled face plane.
        for f in 0..hull.num_faces() {
            let (n, d) = hull.face_plane(f);
            for v in 0..hull.num_vertices() {
                assert!(n.dot(&hull.vertex(v).coords) <= d + 1.0e-5);
            }
        }
        assert_eq!(hull.num_edges(), 6);
    }

    #[test]
    fn flat_face_diagonals_are_not_edges() {
        let cube = super::unit_cube();
        assert_eq!(cube.num_faces(), 12);
        assert_eq!(cube.num_edges(), 12);

        for i in 0..cube.num_edges() {
            let seg = cube.edge(i);
            // Cube edges are axis-aligned: exactly one coordinate changes.
            let changed = (0..3).filter(|&k| seg.a[k] != seg.b[k]).count();
            assert_eq!(changed, 1);
        }
    }

    #[test]
    fn non_convex_mesh_is_rejected() {
        let (pts, mut idx) = tetrahedron();
        idx[3] = [1, 3, 2];
        assert!(matches!(
            ConvexPolyhedron::from_convex_mesh(pts, &idx),
            Err(ShapeError::NotConvex { .. })
        ));
    }
}
