use na::Unit;

use crate::math::{Isometry, Real, UnitVector, Vector, DEFAULT_EPSILON};
use crate::query::gjk;
use crate::query::{CastError, CastOptions, MprStage};
use crate::shape::SupportMap;

/// The Minkowski difference of two shapes, swept by the translation of the first one.
///
/// Expressed in the local frame of the second shape.
struct SweptCso<'a, G1: ?Sized, G2: ?Sized> {
    pos21: Isometry<Real>,
    g1: &'a G1,
    g2: &'a G2,
    sweep: Vector<Real>,
    margin: Real,
}

impl<G1, G2> SweptCso<'_, G1, G2>
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    fn support(&self, dir: &Vector<Real>) -> Vector<Real> {
        let mut pt = self.g1.support_point(&self.pos21, dir).coords
            - self.g2.local_support_point(&-dir).coords;

        if dir.dot(&self.sweep) > 0.0 {
            pt += self.sweep;
        }

        if self.margin > 0.0 {
            if let Some(dir) = Unit::try_new(*dir, DEFAULT_EPSILON) {
                pt += *dir * self.margin;
            }
        }

        pt
    }

    fn interior_point(&self) -> Vector<Real> {
        (self.pos21 * self.g1.local_interior_point()).coords
            - self.g2.local_interior_point().coords
            + self.sweep * 0.5
    }
}

/// Computes the first time at which `g1`, translated by `vel`, touches `g2`.
///
/// Returns the distance travelled along `vel` at the time of impact, and the
/// world-space normal of `g1` at the contact. `Ok(None)` means that the
/// shapes do not touch along the sweep. The shapes must not overlap at the
/// start of the sweep.
///
/// If the configuration space is too flat for the portal to be resolved,
/// the sweep is retried once with a configuration space dilated by
/// `options.tolerance`.
pub fn cast_support_maps<G1, G2>(
    pos1: &Isometry<Real>,
    vel: &Vector<Real>,
    g1: &G1,
    pos2: &Isometry<Real>,
    g2: &G2,
    options: &CastOptions,
) -> Result<Option<(Real, UnitVector<Real>)>, CastError>
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    match cast_swept_cso(pos1, vel, g1, pos2, g2, options, 0.0) {
        Err(err) => {
            log::debug!("{}, retrying with a dilated configuration space", err);
            cast_swept_cso(pos1, vel, g1, pos2, g2, options, options.tolerance)
        }
        res => res,
    }
}

fn cast_swept_cso<G1, G2>(
    pos1: &Isometry<Real>,
    vel: &Vector<Real>,
    g1: &G1,
    pos2: &Isometry<Real>,
    g2: &G2,
    options: &CastOptions,
    margin: Real,
) -> Result<Option<(Real, UnitVector<Real>)>, CastError>
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let sweep = pos2.inverse_transform_vector(vel);
    let (dir, length) = match Unit::try_new_and_get(sweep, DEFAULT_EPSILON) {
        Some(res) => res,
        None => return Ok(None),
    };

    let cso = SweptCso {
        pos21: pos2.inv_mul(pos1),
        g1,
        g2,
        sweep,
        margin,
    };
    let support = |d: &Vector<Real>| cso.support(d);

    // The shapes touch along the sweep iff the swept CSO contains the origin.
    let center = cso.interior_point();

    if let Some((to_origin, center_dist)) = Unit::try_new_and_get(-center, gjk::eps_tol()) {
        let (exit, _) = exit_distance(&support, &center, &to_origin, options)
            .map_err(|err| at_stage(err, MprStage::OverlapTest))?;

        if exit < center_dist {
            return Ok(None);
        }
    }

    // The boundary crossed by the sweep direction from the origin is the
    // static CSO translated by the whole sweep, shifted back by the time of impact.
    let (exit, normal) = exit_distance(&support, &Vector::zeros(), &dir, options)?;
    let toi = (length - exit).clamp(0.0, length);

    Ok(Some((toi, pos2.rotation * normal)))
}

fn at_stage(err: CastError, stage: MprStage) -> CastError {
    match err {
        CastError::NumericalFault { iterations, .. } => {
            CastError::NumericalFault { stage, iterations }
        }
    }
}

/// Distance from `start` to the boundary of a convex set along the ray `start + t * dir`.
///
/// `start` must lie inside of the set. Returns the distance along with the
/// outward normal of the boundary where the ray exits.
fn exit_distance(
    support: &dyn Fn(&Vector<Real>) -> Vector<Real>,
    start: &Vector<Real>,
    dir: &UnitVector<Real>,
    options: &CastOptions,
) -> Result<(Real, UnitVector<Real>), CastError> {
    let eps = gjk::eps_tol();

    // Move the ray target `start + dir` to the origin, so that the
    // interior point becomes `-dir`.
    let target = start + dir.into_inner();
    let s = |d: &Vector<Real>| support(d) - target;
    let v0 = -dir.into_inner();

    /*
     * Portal discovery.
     */
    let mut v1 = s(dir.as_ref());
    let mut n = v1.cross(&v0);

    if n.norm() <= eps * v1.norm().max(1.0) {
        // The support point lies on the ray.
        return Ok(((v1 - v0).dot(dir.as_ref()), *dir));
    }

    let mut v2 = s(&n);
    n = (v1 - v0).cross(&(v2 - v0));

    if n.norm() <= eps {
        return Err(CastError::NumericalFault {
            stage: MprStage::PortalDiscovery,
            iterations: 0,
        });
    }

    if n.dot(&v0) > 0.0 {
        core::mem::swap(&mut v1, &mut v2);
        n = -n;
    }

    let mut v3 = Vector::zeros();
    let mut iterations = 0;
    let mut discovered = false;

    while iterations < options.max_iterations {
        iterations += 1;
        v3 = s(&n);

        if v1.cross(&v3).dot(&v0) < 0.0 {
            v2 = v3;
            n = (v1 - v0).cross(&(v3 - v0));
        } else if v3.cross(&v2).dot(&v0) < 0.0 {
            v1 = v3;
            n = (v3 - v0).cross(&(v2 - v0));
        } else {
            discovered = true;
            break;
        }
    }

    if !discovered {
        return Err(CastError::NumericalFault {
            stage: MprStage::PortalDiscovery,
            iterations,
        });
    }

    /*
     * Portal refinement.
     */
    let mut iterations = 0;

    loop {
        let normal = Unit::try_new((v2 - v1).cross(&(v3 - v1)), eps).ok_or(
            CastError::NumericalFault {
                stage: MprStage::PortalRefinement,
                iterations,
            },
        )?;
        let v4 = s(normal.as_ref());

        if normal.dot(&(v4 - v3)) <= options.tolerance {
            // The ray exits through the portal, so its normal must face the ray.
            let proj = normal.dot(dir.as_ref());

            if proj.abs() <= eps {
                return Err(CastError::NumericalFault {
                    stage: MprStage::PortalRefinement,
                    iterations,
                });
            }

            let normal = if proj < 0.0 { -normal } else { normal };
            return Ok((normal.dot(&(v1 - v0)) / proj.abs(), normal));
        }

        if iterations >= options.max_iterations {
            return Err(CastError::NumericalFault {
                stage: MprStage::PortalRefinement,
                iterations,
            });
        }

        iterations += 1;

        let temp = v4.cross(&v0);

        if v1.dot(&temp) > 0.0 {
            if v2.dot(&temp) > 0.0 {
                v1 = v4;
            } else {
                v3 = v4;
            }
        } else if v3.dot(&temp) > 0.0 {
            v2 = v4;
        } else {
            v1 = v4;
        }
    }
}
