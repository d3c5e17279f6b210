use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::{
    Ball, Capsule, Compound, ConvexPolyhedron, Cuboid, HeightField, SupportMap, TriMesh, Triangle,
    TriangleSet,
};

/// Enum representing the type of a shape.
///
/// The declaration order is the canonical pair order: a query between two
/// shapes is always solved with the lesser type first, and flipped if needed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShapeType {
    /// A ball shape.
    Ball,
    /// A capsule shape.
    Capsule,
    /// A convex polyhedron.
    ConvexPolyhedron,
    /// A cuboid shape.
    Cuboid,
    /// A triangle shape.
    Triangle,
    /// A compound shape.
    Compound,
    /// A triangle mesh shape.
    TriMesh,
    /// A heightfield shape.
    HeightField,
}

/// A shape, as a closed set of kinds.
///
/// Primitive kinds store their parameters by value. Convex polyhedra, triangle
/// meshes, heightfields and compounds reference shared immutable data, so
/// cloning a `Shape` is always cheap.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// A ball.
    Ball(Ball),
    /// A capsule.
    Capsule(Capsule),
    /// A convex polyhedron.
    ConvexPolyhedron(ConvexPolyhedron),
    /// A cuboid.
    Cuboid(Cuboid),
    /// A triangle.
    Triangle(Triangle),
    /// A compound of primitive shapes.
    Compound(Compound),
    /// A triangle mesh.
    TriMesh(TriMesh),
    /// A heightfield.
    HeightField(HeightField),
}

static_assertions::assert_impl_all!(Shape: Send, Sync);

impl Shape {
    /// The type of this shape.
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Shape::Ball(_) => ShapeType::Ball,
            Shape::Capsule(_) => ShapeType::Capsule,
            Shape::ConvexPolyhedron(_) => ShapeType::ConvexPolyhedron,
            Shape::Cuboid(_) => ShapeType::Cuboid,
            Shape::Triangle(_) => ShapeType::Triangle,
            Shape::Compound(_) => ShapeType::Compound,
            Shape::TriMesh(_) => ShapeType::TriMesh,
            Shape::HeightField(_) => ShapeType::HeightField,
        }
    }

    /// Is this a compound, triangle mesh, or heightfield?
    pub fn is_composite(&self) -> bool {
        self.shape_type() >= ShapeType::Compound
    }

    /// This shape as a support map, if it is convex.
    pub fn as_support_map(&self) -> Option<&dyn SupportMap> {
        match self {
            Shape::Ball(s) => Some(s),
            Shape::Capsule(s) => Some(s),
            Shape::ConvexPolyhedron(s) => Some(s),
            Shape::Cuboid(s) => Some(s),
            Shape::Triangle(s) => Some(s),
            Shape::Compound(_) | Shape::TriMesh(_) | Shape::HeightField(_) => None,
        }
    }

    /// Computes the AABB of this shape in its local frame.
    pub fn compute_local_aabb(&self) -> Aabb {
        match self {
            Shape::Ball(b) => Aabb::from_half_extents(Point::origin(), Vector::repeat(b.radius)),
            Shape::Capsule(c) => {
                Aabb::from_points(&[c.segment.a, c.segment.b]).loosened(c.radius)
            }
            Shape::ConvexPolyhedron(c) => c.local_aabb(),
            Shape::Cuboid(c) => c.local_aabb(),
            Shape::Triangle(t) => t.local_aabb(),
            Shape::Compound(c) => *c.local_aabb(),
            Shape::TriMesh(t) => t.local_aabb(),
            Shape::HeightField(h) => h.local_aabb(),
        }
    }

    /// Computes the AABB of this shape placed at `pos`.
    pub fn compute_aabb(&self, pos: &Isometry<Real>) -> Aabb {
        match self {
            Shape::Ball(b) => Aabb::from_half_extents(
                Point::from(pos.translation.vector),
                Vector::repeat(b.radius),
            ),
            Shape::Capsule(c) => {
                let seg = c.segment.transformed(pos);
                Aabb::from_points(&[seg.a, seg.b]).loosened(c.radius)
            }
            Shape::Triangle(t) => t.transformed(pos).local_aabb(),
            _ => self.compute_local_aabb().transform_by(pos),
        }
    }
}

macro_rules! impl_from_primitive(
    ($($Variant: ident),*) => {$(
        impl From<$Variant> for Shape {
            fn from(shape: $Variant) -> Shape {
                Shape::$Variant(shape)
            }
        }
    )*}
);

impl_from_primitive!(
    Ball,
    Capsule,
    ConvexPolyhedron,
    Cuboid,
    Triangle,
    Compound,
    TriMesh,
    HeightField
);
