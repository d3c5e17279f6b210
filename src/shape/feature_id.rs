//! Enum identifying the feature of a shape.

/// An identifier of a geometric feature (vertex, edge, or face) of a shape.
///
/// Returned along with closest points so that callers can recognize the same
/// contact from one query to the next.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, Default)]
pub enum FeatureId {
    /// Shape-dependent identifier of a vertex.
    Vertex(u32),
    /// Shape-dependent identifier of an edge.
    Edge(u32),
    /// Shape-dependent identifier of a face.
    Face(u32),
    /// Unknown identifier.
    #[default]
    Unknown,
}

const CODE_MASK: u32 = 0x3fff_ffff;
const HEADER_MASK: u32 = !CODE_MASK;
const HEADER_VERTEX: u32 = 0b01 << 30;
const HEADER_EDGE: u32 = 0b10 << 30;
const HEADER_FACE: u32 = 0b11 << 30;

impl FeatureId {
    /// Packs this feature id into a single opaque integer.
    ///
    /// The two most significant bits hold the feature kind, so identifiers
    /// must fit in 30 bits. [`FeatureId::Unknown`] packs to zero.
    pub fn pack(self) -> u32 {
        match self {
            FeatureId::Vertex(id) => id | HEADER_VERTEX,
            FeatureId::Edge(id) => id | HEADER_EDGE,
            FeatureId::Face(id) => id | HEADER_FACE,
            FeatureId::Unknown => 0,
        }
    }

    /// Reverses [`FeatureId::pack`].
    pub fn unpack(code: u32) -> FeatureId {
        let header = code & HEADER_MASK;
        let id = code & CODE_MASK;
        match header {
            HEADER_VERTEX => FeatureId::Vertex(id),
            HEADER_EDGE => FeatureId::Edge(id),
            HEADER_FACE => FeatureId::Face(id),
            _ => FeatureId::Unknown,
        }
    }
}
