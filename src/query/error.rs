use core::fmt;

/// The step of the portal refinement that failed to converge.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum MprStage {
    /// Testing whether the swept configuration space contains the origin.
    OverlapTest,
    /// Searching for a portal crossed by the sweep direction.
    PortalDiscovery,
    /// Refining the portal toward the boundary of the configuration space.
    PortalRefinement,
}

impl fmt::Display for MprStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MprStage::OverlapTest => "overlap test",
            MprStage::PortalDiscovery => "portal discovery",
            MprStage::PortalRefinement => "portal refinement",
        };
        f.pad(name)
    }
}

/// Error returned by a cast that could not be resolved numerically.
///
/// This is distinct from a miss: the shapes may or may not hit each other
/// along the sweep, but the solver could not decide it. See
/// [`FaultPolicy`](crate::query::FaultPolicy) to degrade it to a miss instead.
#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum CastError {
    /// The portal refinement sweep failed.
    #[error("the sweep solver failed during the {stage} after {iterations} iterations")]
    NumericalFault {
        /// The step that failed.
        stage: MprStage,
        /// The number of iterations performed by that step.
        iterations: usize,
    },
}
