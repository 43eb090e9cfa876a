//! Point storage consumed by the agglomeration engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of an input point within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId(pub usize);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read-only vector database: id enumeration plus point lookup.
///
/// The engine enumerates ids once at setup; metrics look points up as
/// often as they like. The id order must be stable for the duration of a
/// run, since it fixes the singleton creation order and with it the
/// deterministic merge sequence.
pub trait VectorDatabase {
    /// All point identifiers, in stable order.
    fn ids(&self) -> Vec<PointId>;

    /// The coordinates of a point, if present.
    fn point(&self, id: PointId) -> Option<&[f64]>;

    /// Number of points.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory database backed by a dense vector list; ids are positions.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    points: Vec<Vec<f64>>,
}

impl InMemoryDatabase {
    pub fn new(points: Vec<Vec<f64>>) -> Self {
        Self { points }
    }

    /// Dimensionality of the stored vectors (0 when empty).
    pub fn dimensions(&self) -> usize {
        self.points.first().map(Vec::len).unwrap_or(0)
    }
}

impl VectorDatabase for InMemoryDatabase {
    fn ids(&self) -> Vec<PointId> {
        (0..self.points.len()).map(PointId).collect()
    }

    fn point(&self, id: PointId) -> Option<&[f64]> {
        self.points.get(id.0).map(Vec::as_slice)
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}
