pub mod entity;
pub mod indexed;
pub mod json;

pub use entity::{EdgeClass, EntityData, EntityId};
pub use indexed::IndexedGraph;
pub use json::{load_adjacency_files, load_graph_file};

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Serialized form; the lookup index is rebuilt on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EntityGraphData {
    entities: Vec<EntityData>,
}

impl From<EntityGraph> for EntityGraphData {
    fn from(graph: EntityGraph) -> Self {
        Self {
            entities: graph.entities,
        }
    }
}

impl From<EntityGraphData> for EntityGraph {
    fn from(data: EntityGraphData) -> Self {
        Self::from_entities(data.entities)
    }
}

/// Snapshot of the face-adjacency graph of one solid.
///
/// Owned by whatever loads the model; detection only reads it. Entities
/// keep the order in which they were added.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "EntityGraphData", into = "EntityGraphData")]
pub struct EntityGraph {
    entities: Vec<EntityData>,
    /// Position of the first record carrying each id.
    index: HashMap<EntityId, usize>,
}

impl PartialEq for EntityGraph {
    fn eq(&self, other: &Self) -> bool {
        self.entities == other.entities
    }
}

impl Eq for EntityGraph {}

impl EntityGraph {
    /// Creates a new, empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from already assembled entity records.
    #[must_use]
    pub fn from_entities(entities: Vec<EntityData>) -> Self {
        let mut index = HashMap::with_capacity(entities.len());
        for (pos, entity) in entities.iter().enumerate() {
            index.entry(entity.id).or_insert(pos);
        }
        Self { entities, index }
    }

    /// Appends an entity record.
    pub fn add_entity(&mut self, data: EntityData) {
        self.index.entry(data.id).or_insert(self.entities.len());
        self.entities.push(data);
    }

    /// Records a shared edge in the records of both endpoints, creating
    /// missing records on the way.
    pub fn connect(&mut self, a: EntityId, b: EntityId, class: EdgeClass) {
        self.record_mut(a).add_edge(b, class);
        if a != b {
            self.record_mut(b).add_edge(a, class);
        }
    }

    fn record_mut(&mut self, id: EntityId) -> &mut EntityData {
        let next = self.entities.len();
        let idx = *self.index.entry(id).or_insert(next);
        if idx == next {
            self.entities.push(EntityData::new(id));
        }
        &mut self.entities[idx]
    }

    /// Returns the record of an entity, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if no entity with this id exists.
    pub fn entity(&self, id: EntityId) -> Result<&EntityData, GraphError> {
        self.index
            .get(&id)
            .map(|&idx| &self.entities[idx])
            .ok_or(GraphError::EntityNotFound(id))
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if the graph has no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterates entity records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, EntityData> {
        self.entities.iter()
    }

    /// Checks that entity ids are unique.
    ///
    /// Self-loops and neighbors that reference unknown entities are
    /// tolerated; detection skips them.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateEntity`] for the first repeated id.
    pub fn validate(&self) -> Result<(), GraphError> {
        let mut seen = HashSet::with_capacity(self.entities.len());
        for entity in &self.entities {
            if !seen.insert(entity.id) {
                return Err(GraphError::DuplicateEntity(entity.id));
            }
        }
        Ok(())
    }
}
