use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a face in the adjacency graph.
///
/// Ordering is numeric ascending and is the tie-break order used
/// throughout detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for EntityId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Classification code of one boundary edge shared by two faces.
///
/// Only [`EdgeClass::CONCAVE`] carries meaning for pocket detection; the
/// other codes are kept as-is so unknown classifications survive a
/// load/save cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeClass(pub u8);

impl EdgeClass {
    /// The two faces meet in a concave edge.
    pub const CONCAVE: Self = Self(0);
    /// The two faces meet in a convex edge.
    pub const CONVEX: Self = Self(1);
    /// The two faces meet tangentially.
    pub const SMOOTH: Self = Self(2);

    /// Returns `true` for the concave code.
    #[must_use]
    pub fn is_concave(self) -> bool {
        self == Self::CONCAVE
    }
}

/// A face together with its neighbor records.
///
/// A pair of faces may share several boundary edges, so each neighbor
/// maps to the classification of every shared edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityData {
    pub id: EntityId,
    #[serde(default)]
    pub neighbors: BTreeMap<EntityId, Vec<EdgeClass>>,
}

impl EntityData {
    /// Creates a face with no neighbors.
    #[must_use]
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            neighbors: BTreeMap::new(),
        }
    }

    /// Records one shared edge with `neighbor`.
    pub fn add_edge(&mut self, neighbor: EntityId, class: EdgeClass) {
        self.neighbors.entry(neighbor).or_default().push(class);
    }

    /// Number of neighbor records, self-references excluded.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.neighbors.keys().filter(|&&n| n != self.id).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_ignores_self_loop() {
        let mut e = EntityData::new(EntityId(4));
        e.add_edge(EntityId(4), EdgeClass::CONCAVE);
        e.add_edge(EntityId(5), EdgeClass::CONCAVE);
        e.add_edge(EntityId(5), EdgeClass::CONVEX);
        assert_eq!(e.degree(), 1);
        assert_eq!(e.neighbors[&EntityId(5)].len(), 2);
    }

    #[test]
    fn concave_code_is_zero() {
        assert!(EdgeClass(0).is_concave());
        assert!(!EdgeClass::CONVEX.is_concave());
        assert!(!EdgeClass(7).is_concave());
    }
}
