use crate::math::{Point, Real, UnitVector, Vector, DIM};
use crate::query::{PointProjection, PointQuery};
use crate::shape::{Cuboid, FeatureId};

impl Cuboid {
    /// The identifier of the smallest feature containing the boundary point `pt`.
    fn feature_at(&self, pt: &Point<Real>) -> FeatureId {
        let mut signs = [0i8; DIM];
        let mut num_on_bounds = 0;

        for k in 0..DIM {
            let h = self.half_extents[k];
            if pt[k] >= h && pt[k] >= 0.0 {
                signs[k] = 1;
                num_on_bounds += 1;
            } else if pt[k] <= -h {
                signs[k] = -1;
                num_on_bounds += 1;
            }
        }

        match num_on_bounds {
            3 => {
                let id = (0..DIM).fold(0, |id, k| if signs[k] > 0 { id | (1 << k) } else { id });
                FeatureId::Vertex(id)
            }
            2 => {
                let free = (0..DIM).position(|k| signs[k] == 0).unwrap_or(0);
                let (i, j) = ((free + 1) % DIM, (free + 2) % DIM);
                let (i, j) = (i.min(j), i.max(j));
                let mut s = 0;
                if signs[i] > 0 {
                    s |= 1;
                }
                if signs[j] > 0 {
                    s |= 2;
                }
                FeatureId::Edge(4 * free as u32 + s)
            }
            1 => {
                let k = (0..DIM).position(|k| signs[k] != 0).unwrap_or(0);
                if signs[k] > 0 {
                    FeatureId::Face(k as u32)
                } else {
                    FeatureId::Face(k as u32 + 3)
                }
            }
            _ => FeatureId::Unknown,
        }
    }
}

impl PointQuery for Cuboid {
    #[inline]
    fn project_local_point(&self, pt: &Point<Real>, solid: bool) -> PointProjection {
        let clamped = pt.coords.zip_map(&self.half_extents, |p, h| p.max(-h).min(h));

        if clamped != pt.coords {
            return PointProjection::new(false, Point::from(clamped));
        }

        if solid {
            return PointProjection::new(true, *pt);
        }

        // Push the point toward the closest face.
        let mut best_axis = 0;
        let mut best_dist = Real::MAX;

        for k in 0..DIM {
            let dist = self.half_extents[k] - pt[k].abs();
            if dist < best_dist {
                best_dist = dist;
                best_axis = k;
            }
        }

        let mut proj = *pt;
        proj[best_axis] = self.half_extents[best_axis].copysign(pt[best_axis]);
        PointProjection::new(true, proj)
    }

    #[inline]
    fn project_local_point_and_get_feature(
        &self,
        pt: &Point<Real>,
    ) -> (PointProjection, FeatureId) {
        let proj = self.project_local_point(pt, false);

        if proj.is_inside {
            // Only the face the point was pushed to is relevant.
            let mut best_axis = 0;
            let mut best_dist = Real::MAX;

            for k in 0..DIM {
                let dist = (self.half_extents[k] - proj.point[k].abs()).abs();
                if dist < best_dist {
                    best_dist = dist;
                    best_axis = k;
                }
            }

            let face = if pt[best_axis] >= 0.0 {
                best_axis as u32
            } else {
                best_axis as u32 + 3
            };
            (proj, FeatureId::Face(face))
        } else {
            (proj, self.feature_at(&proj.point))
        }
    }

    fn feature_normal(&self, feature: FeatureId) -> Option<UnitVector<Real>> {
        let normal = match feature {
            FeatureId::Face(id) if id < 3 => Vector::ith(id as usize, 1.0),
            FeatureId::Face(id) if id < 6 => Vector::ith(id as usize - 3, -1.0),
            FeatureId::Edge(id) if id < 12 => {
                let free = id as usize / 4;
                let (i, j) = ((free + 1) % DIM, (free + 2) % DIM);
                let (i, j) = (i.min(j), i.max(j));
                let si = if id & 1 != 0 { 1.0 } else { -1.0 };
                let sj = if id & 2 != 0 { 1.0 } else { -1.0 };
                Vector::ith(i, si) + Vector::ith(j, sj)
            }
            FeatureId::Vertex(id) if id < 8 => {
                let mut res = Vector::repeat(1.0);
                for k in 0..DIM {
                    if id & (1 << k) == 0 {
                        res[k] = -1.0;
                    }
                }
                res
            }
            _ => return None,
        };

        Some(UnitVector::new_normalize(normal))
    }

    #[inline]
    fn contains_local_point(&self, pt: &Point<Real>) -> bool {
        self.local_aabb().contains_local_point(pt)
    }
}

#[cfg(test)]
mod test {
    use crate::math::{Point, Vector};
    use crate::query::PointQuery;
    use crate::shape::{Cuboid, FeatureId};

    #[test]
    fn cuboid_feature_ids_follow_vertex_edge_face_numbering() {
        let cuboid = Cuboid::new(Vector::new(1.0, 2.0, 3.0));

        let (proj, feature) =
            cuboid.project_local_point_and_get_feature(&Point::new(5.0, 5.0, 5.0));
        assert_eq!(proj.point, Point::new(1.0, 2.0, 3.0));
        assert_eq!(feature, FeatureId::Vertex(0b111));

        let (_, feature) = cuboid.project_local_point_and_get_feature(&Point::new(0.0, -5.0, 5.0));
        // Edge along x, y negative, z positive.
        assert_eq!(feature, FeatureId::Edge(0b10));

        let (proj, feature) =
            cuboid.project_local_point_and_get_feature(&Point::new(0.0, 0.0, -5.0));
        assert_eq!(proj.point, Point::new(0.0, 0.0, -3.0));
        assert_eq!(feature, FeatureId::Face(5));
    }

    #[test]
    fn inner_point_is_pushed_to_the_closest_face() {
        let cuboid = Cuboid::new(Vector::new(1.0, 2.0, 3.0));
        let (proj, feature) =
            cuboid.project_local_point_and_get_feature(&Point::new(0.5, 0.1, 0.1));
        assert!(proj.is_inside);
        assert_eq!(proj.point, Point::new(1.0, 0.1, 0.1));
        assert_eq!(feature, FeatureId::Face(0));
        assert_eq!(
            cuboid.feature_normal(FeatureId::Face(4)).map(|n| n.into_inner()),
            Some(-Vector::y())
        );
    }
}
