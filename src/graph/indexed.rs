use crate::error::GraphError;

use super::{EdgeClass, EntityGraph, EntityId};

/// One resolved neighbor record of an indexed entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    /// Dense index of the neighbor.
    pub index: usize,
    /// Whether at least one shared edge carries the concave code.
    pub concave: bool,
}

/// Dense, array-backed view of an [`EntityGraph`].
///
/// Entities are sorted by ascending id and addressed by position, so every
/// later stage can use plain vectors instead of maps. Only records that
/// resolve to another known entity survive: self-references and dangling
/// neighbor ids are dropped, and repeated edge records collapse into one
/// [`Neighbor`].
#[derive(Debug, Clone, Default)]
pub struct IndexedGraph {
    ids: Vec<EntityId>,
    adjacency: Vec<Vec<Neighbor>>,
}

impl IndexedGraph {
    /// Builds the indexed view, treating `concave` as the concave code.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateEntity`] if two records share an id.
    pub fn build(graph: &EntityGraph, concave: EdgeClass) -> Result<Self, GraphError> {
        let mut ids: Vec<EntityId> = graph.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        if let Some(pair) = ids.windows(2).find(|w| w[0] == w[1]) {
            return Err(GraphError::DuplicateEntity(pair[0]));
        }

        let mut adjacency: Vec<Vec<Neighbor>> = vec![Vec::new(); ids.len()];
        let mut self_loops = 0usize;
        let mut dangling = 0usize;

        for entity in graph.iter() {
            let Ok(idx) = ids.binary_search(&entity.id) else {
                continue;
            };
            // BTreeMap keys are ascending, so the list comes out sorted.
            for (&neighbor_id, classes) in &entity.neighbors {
                if neighbor_id == entity.id {
                    self_loops += 1;
                    continue;
                }
                let Ok(neighbor) = ids.binary_search(&neighbor_id) else {
                    dangling += 1;
                    continue;
                };
                adjacency[idx].push(Neighbor {
                    index: neighbor,
                    concave: classes.contains(&concave),
                });
            }
        }

        if self_loops > 0 || dangling > 0 {
            tracing::warn!(
                self_loops,
                dangling,
                "ignored neighbor records that do not name another entity"
            );
        }

        Ok(Self { ids, adjacency })
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` if the graph has no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Id of the entity at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn id(&self, index: usize) -> EntityId {
        self.ids[index]
    }

    /// All ids, ascending.
    #[must_use]
    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    /// Dense index of `id`, if the entity exists.
    #[must_use]
    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.ids.binary_search(&id).ok()
    }

    /// Resolved neighbors from the entity's own record.
    ///
    /// Returns an empty slice if the index is out of bounds.
    #[must_use]
    pub fn neighbors(&self, index: usize) -> &[Neighbor] {
        self.adjacency.get(index).map_or(&[], Vec::as_slice)
    }

    /// Number of distinct neighbors in the entity's own record.
    #[must_use]
    pub fn degree(&self, index: usize) -> usize {
        self.neighbors(index).len()
    }
}
