use crate::math::{Real, UnitVector, Vector};

/// A unit vector orthogonal to `v`.
///
/// The result is deterministic: the same input always yields the same output,
/// and a zero `v` yields the `y` axis.
pub fn any_orthogonal_unit(v: &Vector<Real>) -> UnitVector<Real> {
    // Cross with the axis the least aligned with `v`.
    let abs = v.abs();
    let axis = if abs.x <= abs.y && abs.x <= abs.z {
        Vector::x()
    } else if abs.y <= abs.z {
        Vector::y()
    } else {
        Vector::z()
    };

    UnitVector::try_new(v.cross(&axis), Real::EPSILON).unwrap_or_else(Vector::y_axis)
}

/// Two unit vectors forming, with `n`, a right-handed orthonormal basis.
pub fn orthonormal_basis(n: &UnitVector<Real>) -> [UnitVector<Real>; 2] {
    let t1 = any_orthogonal_unit(n);
    let t2 = UnitVector::new_unchecked(n.cross(t1.as_ref()));
    [t1, t2]
}
