//! Distance queries on many independent pairs.

use alloc::vec::Vec;

use crate::math::{Isometry, Real};
use crate::query::{distance_between, DistanceResult};
use crate::shape::Shape;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Two placed shapes.
pub type ShapePair<'a> = (&'a Isometry<Real>, &'a Shape, &'a Isometry<Real>, &'a Shape);

/// Runs [`distance_between`] on every pair, in order.
///
/// With the `parallel` feature the pairs are distributed on the rayon thread
/// pool. Queries are pure, so the results are identical either way.
pub fn distance_between_pairs(pairs: &[ShapePair], max_dist: Real) -> Vec<(bool, DistanceResult)> {
    #[cfg(feature = "parallel")]
    let iter = pairs.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = pairs.iter();

    iter.map(|(pos1, g1, pos2, g2)| distance_between(pos1, g1, pos2, g2, max_dist))
        .collect()
}
