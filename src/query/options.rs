use crate::math::Real;

/// What a cast does when its solver reports a numerical fault.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum FaultPolicy {
    /// Return the [`CastError`](crate::query::CastError) to the caller.
    #[default]
    Propagate,
    /// Log a warning and report the cast as a miss.
    TreatAsMiss,
}

/// Configuration of swept queries.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CastOptions {
    /// Convergence tolerance of the portal refinement, in world units.
    pub tolerance: Real,
    /// Maximum number of iterations of each step of the portal refinement.
    pub max_iterations: usize,
    /// Behavior of the cast on numerical faults.
    pub fault_policy: FaultPolicy,
}

impl Default for CastOptions {
    fn default() -> Self {
        Self {
            tolerance: 1.0e-4,
            max_iterations: 100,
            fault_policy: FaultPolicy::Propagate,
        }
    }
}

impl CastOptions {
    /// These options with a different fault policy.
    pub fn with_fault_policy(mut self, fault_policy: FaultPolicy) -> Self {
        self.fault_policy = fault_policy;
        self
    }
}
