use alloc::sync::Arc;

use na::DMatrix;

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::shape::error::validate_scale;
use crate::shape::{ShapeError, Triangle, TriangleSet};

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// The status of the cell of a heightfield.
pub struct HeightFieldCellStatus(u8);

bitflags::bitflags! {
    impl HeightFieldCellStatus: u8 {
        /// If this bit is set, the concerned heightfield cell is subdivided using a Z pattern.
        const ZIGZAG_SUBDIVISION = 0b00000001;
        /// If this bit is set, the leftmost triangle of the concerned heightfield cell is removed.
        const LEFT_TRIANGLE_REMOVED = 0b00000010;
        /// If this bit is set, the rightmost triangle of the concerned heightfield cell is removed.
        const RIGHT_TRIANGLE_REMOVED = 0b00000100;
        /// If this bit is set, both triangles of the concerned heightfield cell are removed.
        const CELL_REMOVED =
            Self::LEFT_TRIANGLE_REMOVED.bits() | Self::RIGHT_TRIANGLE_REMOVED.bits();
    }
}

/// The immutable grid of a heightfield.
///
/// The grid spans `[-0.5, 0.5]` along the local `x` (columns) and `z` (rows)
/// axes before scaling, and `heights[(i, j)]` is the unscaled `y` coordinate
/// of the vertex on row `i` and column `j`.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightFieldData {
    heights: DMatrix<Real>,
    status: DMatrix<HeightFieldCellStatus>,
    aabb: Aabb,
}

impl HeightFieldData {
    /// Builds a heightfield grid where every cell has the default status.
    pub fn new(heights: DMatrix<Real>) -> Result<Self, ShapeError> {
        let status = DMatrix::repeat(
            heights.nrows().saturating_sub(1),
            heights.ncols().saturating_sub(1),
            HeightFieldCellStatus::default(),
        );
        Self::with_cell_status(heights, status)
    }

    /// Builds a heightfield grid with an explicit status for each cell.
    pub fn with_cell_status(
        heights: DMatrix<Real>,
        status: DMatrix<HeightFieldCellStatus>,
    ) -> Result<Self, ShapeError> {
        if heights.nrows() < 2 || heights.ncols() < 2 {
            return Err(ShapeError::HeightFieldTooSmall {
                nrows: heights.nrows(),
                ncols: heights.ncols(),
            });
        }

        if status.nrows() != heights.nrows() - 1 || status.ncols() != heights.ncols() - 1 {
            return Err(ShapeError::CellStatusMismatch {
                nrows: heights.nrows() - 1,
                ncols: heights.ncols() - 1,
            });
        }

        let aabb = Aabb::new(
            Point::new(-0.5, heights.min(), -0.5),
            Point::new(0.5, heights.max(), 0.5),
        );

        Ok(Self {
            heights,
            status,
            aabb,
        })
    }

    /// The number of cell rows (along `z`).
    pub fn nrows(&self) -> usize {
        self.heights.nrows() - 1
    }

    /// The number of cell columns (along `x`).
    pub fn ncols(&self) -> usize {
        self.heights.ncols() - 1
    }

    /// The heights of this grid.
    pub fn heights(&self) -> &DMatrix<Real> {
        &self.heights
    }

    /// The status of each cell of this grid.
    pub fn cells_statuses(&self) -> &DMatrix<HeightFieldCellStatus> {
        &self.status
    }

    fn num_triangles(&self) -> usize {
        self.nrows() * self.ncols() * 2
    }

    fn triangle_id(&self, i: usize, j: usize, left: bool) -> u32 {
        let tid = j * self.nrows() + i;
        if left {
            tid as u32
        } else {
            (tid + self.num_triangles() / 2) as u32
        }
    }

    fn split_triangle_id(&self, id: u32) -> (usize, usize, bool) {
        let half = self.num_triangles() / 2;
        let left = (id as usize) < half;
        let tid = if left { id as usize } else { id as usize - half };
        (tid % self.nrows(), tid / self.nrows(), left)
    }

    /// The two unscaled triangles of the cell `(i, j)`, `None` for removed ones.
    pub fn triangles_at(&self, i: usize, j: usize) -> (Option<Triangle>, Option<Triangle>) {
        if i >= self.nrows() || j >= self.ncols() {
            return (None, None);
        }

        let status = self.status[(i, j)];
        let cell_width = 1.0 / self.ncols() as Real;
        let cell_height = 1.0 / self.nrows() as Real;

        let z0 = -0.5 + cell_height * (i as Real);
        let z1 = z0 + cell_height;
        let x0 = -0.5 + cell_width * (j as Real);
        let x1 = x0 + cell_width;

        let p00 = Point::new(x0, self.heights[(i, j)], z0);
        let p10 = Point::new(x0, self.heights[(i + 1, j)], z1);
        let p01 = Point::new(x1, self.heights[(i, j + 1)], z0);
        let p11 = Point::new(x1, self.heights[(i + 1, j + 1)], z1);

        let (left, right) = if status.contains(HeightFieldCellStatus::ZIGZAG_SUBDIVISION) {
            (Triangle::new(p00, p10, p11), Triangle::new(p00, p11, p01))
        } else {
            (Triangle::new(p00, p10, p01), Triangle::new(p10, p11, p01))
        };

        (
            (!status.contains(HeightFieldCellStatus::LEFT_TRIANGLE_REMOVED)).then_some(left),
            (!status.contains(HeightFieldCellStatus::RIGHT_TRIANGLE_REMOVED)).then_some(right),
        )
    }

    /// The unscaled triangle with the given identifier.
    pub fn triangle(&self, id: u32) -> Option<Triangle> {
        if id as usize >= self.num_triangles() {
            return None;
        }

        let (i, j, left) = self.split_triangle_id(id);
        let (tri_left, tri_right) = self.triangles_at(i, j);
        if left {
            tri_left
        } else {
            tri_right
        }
    }

    fn cell_range(val_min: Real, val_max: Real, num_cells: usize) -> (usize, usize) {
        let cell_size = 1.0 / num_cells as Real;
        let min = na::clamp(((val_min + 0.5) / cell_size).floor(), 0.0, (num_cells - 1) as Real);
        let max = na::clamp(((val_max + 0.5) / cell_size).ceil(), 0.0, num_cells as Real);
        (min as usize, max as usize)
    }

    /// Calls `f` with the id of each non-removed triangle of the cells overlapping
    /// the unscaled `aabb`, column by column. Stops when `f` returns `false`.
    pub fn map_triangles_in_local_aabb(&self, aabb: &Aabb, f: &mut dyn FnMut(u32) -> bool) {
        if aabb.maxs.x < -0.5 || aabb.maxs.z < -0.5 || aabb.mins.x > 0.5 || aabb.mins.z > 0.5 {
            return;
        }

        let (min_j, max_j) = Self::cell_range(aabb.mins.x, aabb.maxs.x, self.ncols());
        let (min_i, max_i) = Self::cell_range(aabb.mins.z, aabb.maxs.z, self.nrows());

        for j in min_j..max_j {
            for i in min_i..max_i {
                let status = self.status[(i, j)];

                if status.contains(HeightFieldCellStatus::CELL_REMOVED) {
                    continue;
                }

                let ys = [
                    self.heights[(i, j)],
                    self.heights[(i + 1, j)],
                    self.heights[(i, j + 1)],
                    self.heights[(i + 1, j + 1)],
                ];

                if ys.iter().all(|y| *y > aabb.maxs.y) || ys.iter().all(|y| *y < aabb.mins.y) {
                    continue;
                }

                if !status.contains(HeightFieldCellStatus::LEFT_TRIANGLE_REMOVED)
                    && !f(self.triangle_id(i, j, true))
                {
                    return;
                }

                if !status.contains(HeightFieldCellStatus::RIGHT_TRIANGLE_REMOVED)
                    && !f(self.triangle_id(i, j, false))
                {
                    return;
                }
            }
        }
    }
}

/// A heightfield referencing a shared immutable grid.
///
/// `scale` maps the unit grid to its local frame: `scale.x` and `scale.z` are
/// the dimensions of the field and `scale.y` multiplies the heights.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightField {
    data: Arc<HeightFieldData>,
    scale: Vector<Real>,
}

impl HeightField {
    /// Creates a heightfield sharing the given grid, scaled by `scale`.
    pub fn new(data: Arc<HeightFieldData>, scale: Vector<Real>) -> Result<Self, ShapeError> {
        validate_scale(&scale)?;
        Ok(Self { data, scale })
    }

    /// Builds a heightfield with its own grid.
    pub fn from_heights(heights: DMatrix<Real>, scale: Vector<Real>) -> Result<Self, ShapeError> {
        Self::new(Arc::new(HeightFieldData::new(heights)?), scale)
    }

    /// The shared grid of this heightfield.
    pub fn data(&self) -> &Arc<HeightFieldData> {
        &self.data
    }

    /// The scale applied to the unit grid.
    pub fn scale(&self) -> &Vector<Real> {
        &self.scale
    }
}

impl TriangleSet for HeightField {
    fn local_aabb(&self) -> Aabb {
        self.data.aabb.scaled(&self.scale)
    }

    fn triangle(&self, id: u32) -> Option<Triangle> {
        self.data.triangle(id).map(|tri| tri.scaled(&self.scale))
    }

    fn find_candidates(&self, aabb: &Aabb, f: &mut dyn FnMut(u32) -> bool) {
        let unscaled = aabb.scaled(&self.scale.map(|s| 1.0 / s));
        self.data.map_triangles_in_local_aabb(&unscaled, f)
    }
}
