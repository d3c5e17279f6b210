use crate::math::Real;

/// Error returned when a shape blob fails validation.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum ShapeError {
    /// A convex polyhedron needs at least four vertices and four faces.
    #[error("a convex polyhedron needs at least four vertices and four faces")]
    NotEnoughVertices,
    /// An index references a vertex that does not exist.
    #[error("the index {index} is out of bounds of a buffer of {len} vertices")]
    IndexOutOfBounds {
        /// The faulty index.
        index: u32,
        /// The number of vertices.
        len: usize,
    },
    /// A face has a zero area.
    #[error("the face {0} is degenerate")]
    DegenerateFace(usize),
    /// A vertex lies in front of the plane of one of the faces.
    #[error("the vertex {vertex} lies in front of the face {face}: the polyhedron is not convex")]
    NotConvex {
        /// The face whose plane is violated.
        face: usize,
        /// The vertex violating it.
        vertex: usize,
    },
    /// A triangle mesh must contain at least one triangle.
    #[error("a triangle mesh must contain at least one triangle")]
    EmptyTriMesh,
    /// A heightfield needs at least two rows and two columns of heights.
    #[error("a heightfield needs at least 2x2 heights, got {nrows}x{ncols}")]
    HeightFieldTooSmall {
        /// The number of rows of heights.
        nrows: usize,
        /// The number of columns of heights.
        ncols: usize,
    },
    /// The cell status grid does not match the number of cells.
    #[error("expected a {nrows}x{ncols} cell status grid")]
    CellStatusMismatch {
        /// The expected number of rows.
        nrows: usize,
        /// The expected number of columns.
        ncols: usize,
    },
    /// A compound must contain at least one part.
    #[error("a compound must contain at least one part")]
    EmptyCompound,
    /// Compound parts must be primitive shapes.
    #[error("the compound part {0} is itself a composite shape")]
    NestedComposite(usize),
    /// Scale factors must be finite and non-zero.
    #[error("invalid scale factors {0:?}: they must be finite and non-zero")]
    InvalidScale([Real; 3]),
}

pub(crate) fn validate_scale(scale: &crate::math::Vector<Real>) -> Result<(), ShapeError> {
    if scale.iter().all(|s| s.is_finite() && *s != 0.0) {
        Ok(())
    } else {
        Err(ShapeError::InvalidScale([scale.x, scale.y, scale.z]))
    }
}
