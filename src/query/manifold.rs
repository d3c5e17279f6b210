use arrayvec::ArrayVec;

use crate::math::{Isometry, Point, Real, UnitVector, Vector};
use crate::query::DistanceResult;
use crate::shape::{FeatureId, Shape, ShapeType};

/// The maximum number of points of a contact manifold.
pub const MAX_MANIFOLD_POINTS: usize = 4;

/// A single contact point between two shapes.
///
/// Points are stored in the local frame of each shape so that they remain
/// valid while the shapes move. The feature ids let a caller recognize the
/// same contact from one query to the next.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct TrackedContact {
    /// The contact point in the local-space of the first shape.
    pub local_p1: Point<Real>,
    /// The contact point in the local-space of the second shape.
    pub local_p2: Point<Real>,
    /// The signed distance between the two contact points, negative if they penetrate.
    pub dist: Real,
    /// The feature of the first shape involved in the contact.
    pub fid1: FeatureId,
    /// The feature of the second shape involved in the contact.
    pub fid2: FeatureId,
}

impl TrackedContact {
    /// Creates a new tracked contact.
    pub fn new(
        local_p1: Point<Real>,
        local_p2: Point<Real>,
        fid1: FeatureId,
        fid2: FeatureId,
        dist: Real,
    ) -> Self {
        Self {
            local_p1,
            local_p2,
            dist,
            fid1,
            fid2,
        }
    }

    /// Swaps the two shapes of this contact.
    pub fn flip(&mut self) {
        core::mem::swap(&mut self.local_p1, &mut self.local_p2);
        core::mem::swap(&mut self.fid1, &mut self.fid2);
    }
}

/// How a contact manifold should be completed by a clipping stage.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum ManifoldKind {
    /// The single contact point describes the contact completely.
    SinglePoint,
    /// The pair can touch along an edge or a face: clipping the features
    /// around the contact normal yields a richer manifold.
    NeedsClipping,
}

/// A set of contact points sharing the same normal.
#[derive(Clone, Debug, PartialEq)]
pub struct ContactManifold {
    /// The contact points, at most [`MAX_MANIFOLD_POINTS`].
    pub points: ArrayVec<TrackedContact, MAX_MANIFOLD_POINTS>,
    /// The contact normal in the local-space of the first shape.
    pub local_n1: Vector<Real>,
    /// The contact normal in the local-space of the second shape.
    pub local_n2: Vector<Real>,
    /// The sub-shape of the first shape involved in this contact.
    pub subshape1: u32,
    /// The sub-shape of the second shape involved in this contact.
    pub subshape2: u32,
    /// Whether this manifold can be enriched by clipping.
    pub kind: ManifoldKind,
}

impl Default for ContactManifold {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactManifold {
    /// An empty manifold.
    pub fn new() -> Self {
        Self {
            points: ArrayVec::new(),
            local_n1: Vector::zeros(),
            local_n2: Vector::zeros(),
            subshape1: 0,
            subshape2: 0,
            kind: ManifoldKind::SinglePoint,
        }
    }

    /// Seeds a single-point manifold from the distance between two placed shapes.
    ///
    /// The feature ids, normals and sub-shape indices of `res` are kept so
    /// that a clipping stage can rebuild the touching features.
    pub fn from_distance_result(
        pos1: &Isometry<Real>,
        g1: &Shape,
        pos2: &Isometry<Real>,
        g2: &Shape,
        res: &DistanceResult,
    ) -> Self {
        let mut manifold = Self::new();
        manifold.local_n1 = pos1.inverse_transform_vector(&res.normal1.into_inner());
        manifold.local_n2 = pos2.inverse_transform_vector(&res.normal2.into_inner());
        manifold.subshape1 = res.sub_shape1;
        manifold.subshape2 = res.sub_shape2;
        manifold.kind = manifold_kind(
            leaf_type(g1, res.sub_shape1),
            leaf_type(g2, res.sub_shape2),
        );
        manifold.points.push(TrackedContact::new(
            pos1.inverse_transform_point(&res.point1),
            pos2.inverse_transform_point(&res.point2),
            res.feature1,
            res.feature2,
            res.distance,
        ));
        manifold
    }

    /// The contact normal in world-space, as seen from the first shape.
    pub fn normal(&self, pos1: &Isometry<Real>) -> Option<UnitVector<Real>> {
        UnitVector::try_new(pos1 * self.local_n1, crate::math::DEFAULT_EPSILON)
    }

    /// The deepest contact point of this manifold.
    pub fn deepest_contact(&self) -> Option<&TrackedContact> {
        self.points.iter().min_by(|a, b| a.dist.total_cmp(&b.dist))
    }

    /// Swaps the two shapes of this manifold.
    pub fn flip(&mut self) {
        for pt in &mut self.points {
            pt.flip();
        }

        core::mem::swap(&mut self.local_n1, &mut self.local_n2);
        core::mem::swap(&mut self.subshape1, &mut self.subshape2);
    }
}

/// The type of the primitive actually involved in a contact with `shape`.
fn leaf_type(shape: &Shape, sub_shape: u32) -> ShapeType {
    match shape {
        Shape::Compound(c) => c
            .part(sub_shape as usize)
            .map(|(_, part)| part.shape_type())
            .unwrap_or(ShapeType::Compound),
        Shape::TriMesh(_) | Shape::HeightField(_) => ShapeType::Triangle,
        _ => shape.shape_type(),
    }
}

fn manifold_kind(type1: ShapeType, type2: ShapeType) -> ManifoldKind {
    match (type1, type2) {
        (ShapeType::Ball, _) | (_, ShapeType::Ball) => ManifoldKind::SinglePoint,
        (ShapeType::Cuboid, ShapeType::Cuboid)
        | (ShapeType::Capsule, _)
        | (_, ShapeType::Capsule) => ManifoldKind::NeedsClipping,
        _ => ManifoldKind::SinglePoint,
    }
}

#[cfg(test)]
mod test {
    use super::{ContactManifold, ManifoldKind};
    use crate::math::{Isometry, Point, Vector};
    use crate::query::distance_between;
    use crate::shape::{Ball, Capsule, Compound, Cuboid, Shape};

    #[test]
    fn ball_contacts_are_single_points() {
        let ball = Shape::Ball(Ball::new(1.0));
        let cuboid = Shape::Cuboid(Cuboid::new(Vector::repeat(1.0)));
        let pos1 = Isometry::translation(0.0, 1.9, 0.0);
        let pos2 = Isometry::identity();

        let (_, res) = distance_between(&pos1, &ball, &pos2, &cuboid, 0.0);
        let manifold = ContactManifold::from_distance_result(&pos1, &ball, &pos2, &cuboid, &res);

        assert_eq!(manifold.kind, ManifoldKind::SinglePoint);
        assert_eq!(manifold.points.len(), 1);
        assert_eq!(manifold.deepest_contact(), manifold.points.first());
        assert_relative_eq!(manifold.points[0].dist, -0.1, epsilon = 1.0e-5);
        assert_relative_eq!(
            manifold.points[0].local_p1,
            Point::new(0.0, -1.0, 0.0),
            epsilon = 1.0e-5
        );
        assert_relative_eq!(manifold.local_n1, -Vector::y(), epsilon = 1.0e-5);
    }

    #[test]
    fn box_stacks_need_clipping() {
        let cuboid = Shape::Cuboid(Cuboid::new(Vector::repeat(1.0)));
        let compound = Shape::Compound(
            Compound::new(vec![
                (Isometry::identity(), Shape::Capsule(Capsule::new_y(1.0, 0.5))),
                (Isometry::translation(5.0, 0.0, 0.0), cuboid.clone()),
            ])
            .unwrap(),
        );
        let pos1 = Isometry::translation(5.0, 1.95, 0.0);
        let pos2 = Isometry::identity();

        let (_, res) = distance_between(&pos1, &cuboid, &pos2, &compound, 0.0);
        assert_eq!(res.sub_shape2, 1);

        let mut manifold = ContactManifold::from_distance_result(
            &pos1,
            &cuboid,
            &pos2,
            &compound,
            &res,
        );
        assert_eq!(manifold.kind, ManifoldKind::NeedsClipping);

        manifold.flip();
        assert_eq!(manifold.subshape1, 1);
        assert_relative_eq!(manifold.local_n1, Vector::y(), epsilon = 1.0e-5);
    }
}
