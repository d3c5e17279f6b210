use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::partitioning::Bvh;
use crate::shape::error::validate_scale;
use crate::shape::{ShapeError, Triangle, TriangleSet};

/// The immutable geometry of a triangle mesh, with its AABB tree.
#[derive(Clone, Debug, PartialEq)]
pub struct TriMeshData {
    vertices: Vec<Point<Real>>,
    indices: Vec<[u32; 3]>,
    bvh: Bvh,
}

impl TriMeshData {
    /// Builds the geometry of a triangle mesh from its vertex and index buffers.
    pub fn new(vertices: Vec<Point<Real>>, indices: Vec<[u32; 3]>) -> Result<Self, ShapeError> {
        if indices.is_empty() {
            return Err(ShapeError::EmptyTriMesh);
        }

        if let Some(index) = indices
            .iter()
            .flatten()
            .find(|idx| **idx as usize >= vertices.len())
        {
            return Err(ShapeError::IndexOutOfBounds {
                index: *index,
                len: vertices.len(),
            });
        }

        let leaves = indices
            .iter()
            .enumerate()
            .map(|(i, idx)| {
                let aabb = Aabb::from_points(idx.iter().map(|k| &vertices[*k as usize]));
                (i as u32, aabb)
            })
            .collect();
        let bvh = Bvh::from_leaves(leaves);

        Ok(Self {
            vertices,
            indices,
            bvh,
        })
    }

    /// The vertex buffer of this mesh.
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The index buffer of this mesh.
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// The AABB tree of this mesh, built on the unscaled triangles.
    pub fn bvh(&self) -> &Bvh {
        &self.bvh
    }

    /// The unscaled triangle `i`.
    pub fn triangle(&self, i: u32) -> Option<Triangle> {
        let idx = self.indices.get(i as usize)?;
        Some(Triangle::new(
            self.vertices[idx[0] as usize],
            self.vertices[idx[1] as usize],
            self.vertices[idx[2] as usize],
        ))
    }
}

/// A triangle mesh referencing shared immutable geometry, with a local scale.
#[derive(Clone, Debug, PartialEq)]
pub struct TriMesh {
    data: Arc<TriMeshData>,
    scale: Vector<Real>,
}

impl TriMesh {
    /// Creates an unscaled triangle mesh sharing the given geometry.
    pub fn new(data: Arc<TriMeshData>) -> Self {
        Self {
            data,
            scale: Vector::repeat(1.0),
        }
    }

    /// Builds a triangle mesh with its own geometry blob.
    pub fn from_buffers(
        vertices: Vec<Point<Real>>,
        indices: Vec<[u32; 3]>,
    ) -> Result<Self, ShapeError> {
        TriMeshData::new(vertices, indices).map(|data| Self::new(Arc::new(data)))
    }

    /// This mesh with a different local scale.
    pub fn with_scale(mut self, scale: Vector<Real>) -> Result<Self, ShapeError> {
        validate_scale(&scale)?;
        self.scale = scale;
        Ok(self)
    }

    /// The shared geometry of this mesh.
    pub fn data(&self) -> &Arc<TriMeshData> {
        &self.data
    }

    /// The local scale applied to the shared geometry.
    pub fn scale(&self) -> &Vector<Real> {
        &self.scale
    }

    /// The number of triangles of this mesh.
    pub fn num_triangles(&self) -> usize {
        self.data.indices.len()
    }
}

impl TriangleSet for TriMesh {
    fn local_aabb(&self) -> Aabb {
        self.data
            .bvh
            .root_aabb()
            .unwrap_or_else(Aabb::new_invalid)
            .scaled(&self.scale)
    }

    fn triangle(&self, id: u32) -> Option<Triangle> {
        self.data.triangle(id).map(|tri| tri.scaled(&self.scale))
    }

    fn find_candidates(&self, aabb: &Aabb, f: &mut dyn FnMut(u32) -> bool) {
        let unscaled = aabb.scaled(&self.scale.map(|s| 1.0 / s));
        let _ = self.data.bvh.intersect_aabb(&unscaled, f);
    }
}
