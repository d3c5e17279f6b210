//! Definition of the triangle shape.

use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Point, Real, UnitVector, Vector};
use crate::shape::{Segment, SupportMap};
use crate::utils;

/// A triangle shape.
///
/// Triangles are open: they have no inside. Their front face (feature
/// `Face(0)`) is the one seen counter-clockwise; `Face(1)` is the back face.
/// Edge `i` goes from vertex `i` to vertex `(i + 1) % 3`.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Triangle {
    /// The triangle first point.
    pub a: Point<Real>,
    /// The triangle second point.
    pub b: Point<Real>,
    /// The triangle third point.
    pub c: Point<Real>,
}

/// Description of the location of a point on a triangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TrianglePointLocation {
    /// The point lies on a vertex.
    OnVertex(u32),
    /// The point lies on an edge.
    ///
    /// The weights are the barycentric coordinates relative to the first and
    /// second endpoints of the edge.
    OnEdge(u32, [Real; 2]),
    /// The point lies on the triangle interior.
    ///
    /// The integer is the face the point is on (0 for the front face, 1 for
    /// the back face), followed by the barycentric coordinates relative to
    /// `a`, `b` and `c`.
    OnFace(u32, [Real; 3]),
    /// The point lies on the triangle plane interior.
    OnSolid,
}

impl TrianglePointLocation {
    /// The barycentric coordinates corresponding to this location.
    ///
    /// Returns `None` if the location is `OnSolid`.
    pub fn barycentric_coordinates(&self) -> Option<[Real; 3]> {
        let mut bcoords = [0.0; 3];

        match self {
            TrianglePointLocation::OnVertex(i) => bcoords[*i as usize] = 1.0,
            TrianglePointLocation::OnEdge(i, uv) => {
                let i = *i as usize;
                bcoords[i] = uv[0];
                bcoords[(i + 1) % 3] = uv[1];
            }
            TrianglePointLocation::OnFace(_, uvw) => bcoords = *uvw,
            TrianglePointLocation::OnSolid => return None,
        }

        Some(bcoords)
    }
}

impl Triangle {
    /// Creates a triangle from three points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Triangle {
        Triangle { a, b, c }
    }

    /// The three vertices of this triangle.
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 3] {
        [self.a, self.b, self.c]
    }

    /// The three edges of this triangle: [AB, BC, CA].
    #[inline]
    pub fn edges(&self) -> [Segment; 3] {
        [
            Segment::new(self.a, self.b),
            Segment::new(self.b, self.c),
            Segment::new(self.c, self.a),
        ]
    }

    /// The normal of the front face of this triangle, `None` if it is degenerate.
    #[inline]
    pub fn normal(&self) -> Option<UnitVector<Real>> {
        utils::ccw_face_normal([&self.a, &self.b, &self.c])
    }

    /// A vector normal to this triangle with a norm equal to twice its area.
    #[inline]
    pub fn scaled_normal(&self) -> Vector<Real> {
        (self.b - self.a).cross(&(self.c - self.a))
    }

    /// The barycenter of this triangle.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        Point::from((self.a.coords + self.b.coords + self.c.coords) / 3.0)
    }

    /// The AABB of this triangle.
    #[inline]
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_points(&[self.a, self.b, self.c])
    }

    /// This triangle transformed by `m`.
    #[inline]
    pub fn transformed(&self, m: &Isometry<Real>) -> Self {
        Triangle::new(m * self.a, m * self.b, m * self.c)
    }

    /// This triangle with its vertices scaled component-wise by `scale`.
    ///
    /// The vertex order is reversed if the scale mirrors space so that the
    /// front face keeps pointing outward.
    #[inline]
    pub fn scaled(&self, scale: &Vector<Real>) -> Self {
        let a = self.a.coords.component_mul(scale).into();
        let b = self.b.coords.component_mul(scale).into();
        let c = self.c.coords.component_mul(scale).into();

        if scale.x * scale.y * scale.z < 0.0 {
            Triangle::new(a, c, b)
        } else {
            Triangle::new(a, b, c)
        }
    }

    /// Tests if this triangle is degenerate, i.e., its three vertices are collinear.
    pub fn is_affinely_dependent(&self) -> bool {
        const EPS: Real = crate::math::DEFAULT_EPSILON * 100.0;

        let p1p2 = self.b - self.a;
        let p1p3 = self.c - self.a;
        relative_eq!(
            p1p2.cross(&p1p3).norm_squared(),
            0.0,
            epsilon = EPS * p1p2.norm() * p1p3.norm()
        )
    }
}

impl SupportMap for Triangle {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        let d1 = self.a.coords.dot(dir);
        let d2 = self.b.coords.dot(dir);
        let d3 = self.c.coords.dot(dir);

        if d1 >= d2 && d1 >= d3 {
            self.a
        } else if d2 >= d3 {
            self.b
        } else {
            self.c
        }
    }

    #[inline]
    fn local_interior_point(&self) -> Point<Real> {
        self.center()
    }
}
