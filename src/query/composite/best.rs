use crate::math::Real;
use crate::query::{CastResult, DistanceResult};

/// A query result that can be ranked against other results of the same query.
///
/// Lower ranks are better: the distance for distance queries, the time of
/// impact for casts.
pub trait Ranked {
    /// The rank of this result.
    fn rank(&self) -> Real;
}

impl Ranked for DistanceResult {
    #[inline]
    fn rank(&self) -> Real {
        self.distance
    }
}

impl Ranked for CastResult {
    #[inline]
    fn rank(&self) -> Real {
        self.distance
    }
}

/// Keeps the best of a sequence of results.
///
/// On ties, the first result offered is kept, so the reduction only depends
/// on the order in which sub-shapes are visited.
#[derive(Copy, Clone, Debug)]
pub struct Best<T> {
    best: Option<T>,
}

impl<T: Ranked> Default for Best<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ranked> Best<T> {
    /// An empty reduction.
    pub fn new() -> Self {
        Self { best: None }
    }

    /// Keeps `candidate` if it ranks strictly better than the current best.
    ///
    /// Returns `true` if it was kept.
    pub fn offer(&mut self, candidate: T) -> bool {
        if candidate.rank() < self.bound() {
            self.best = Some(candidate);
            true
        } else {
            false
        }
    }

    /// The rank of the current best, `Real::MAX` if nothing was kept yet.
    ///
    /// Sub-shapes whose lower bound exceeds this value cannot improve the result.
    #[inline]
    pub fn bound(&self) -> Real {
        self.best.as_ref().map(Ranked::rank).unwrap_or(Real::MAX)
    }

    /// The current best.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.best.as_ref()
    }

    /// Consumes the reduction and returns its best result.
    #[inline]
    pub fn into_inner(self) -> Option<T> {
        self.best
    }
}
