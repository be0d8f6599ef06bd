use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::graph::EntityId;

/// Identifier of a detected pocket. Ids are contiguous from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PocketId(pub usize);

impl fmt::Display for PocketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One detected pocket and the faces it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pocket {
    pub id: PocketId,
    /// Member faces, ascending.
    pub faces: Vec<EntityId>,
}

/// Result of a detection run: face id to pocket id.
///
/// Faces that belong to no pocket are absent. The map is immutable once
/// produced; a newer detection replaces it as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PocketMap {
    assignments: BTreeMap<EntityId, PocketId>,
}

impl PocketMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_assignments(assignments: BTreeMap<EntityId, PocketId>) -> Self {
        Self { assignments }
    }

    /// Pocket of a face, if it belongs to one.
    #[must_use]
    pub fn get(&self, face: EntityId) -> Option<PocketId> {
        self.assignments.get(&face).copied()
    }

    /// Returns `true` if the face belongs to a pocket.
    #[must_use]
    pub fn contains(&self, face: EntityId) -> bool {
        self.assignments.contains_key(&face)
    }

    /// Number of faces assigned to a pocket.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Returns `true` if no pocket was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Iterates `(face, pocket)` pairs by ascending face id.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, PocketId)> + '_ {
        self.assignments.iter().map(|(&face, &pocket)| (face, pocket))
    }

    /// Number of distinct pockets.
    #[must_use]
    pub fn pocket_count(&self) -> usize {
        self.assignments
            .values()
            .map(|p| p.0 + 1)
            .max()
            .unwrap_or(0)
    }

    /// Faces of one pocket, ascending. Empty for unknown ids.
    #[must_use]
    pub fn members(&self, pocket: PocketId) -> Vec<EntityId> {
        self.iter()
            .filter(|&(_, p)| p == pocket)
            .map(|(face, _)| face)
            .collect()
    }

    /// All pockets ordered by id.
    #[must_use]
    pub fn pockets(&self) -> Vec<Pocket> {
        let mut pockets: Vec<Pocket> = (0..self.pocket_count())
            .map(|id| Pocket {
                id: PocketId(id),
                faces: Vec::new(),
            })
            .collect();
        for (face, pocket) in self.iter() {
            pockets[pocket.0].faces.push(face);
        }
        pockets
    }

    /// Serializes as `{"<face>": <pocket>, ...}`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, LoadError> {
        Ok(serde_json::to_string(self)?)
    }
}
