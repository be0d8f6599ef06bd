//! JSON boundary for adjacency graphs.
//!
//! Two layouts are understood: the native serde form of [`EntityGraph`],
//! and the split layout written by the model exporter, where one document
//! lists each face's neighbors and a second one classifies every
//! `"<face>-<neighbor>"` edge record.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::LoadError;

use super::{EdgeClass, EntityData, EntityGraph, EntityId};

/// Entity id as it appears on the wire: exporters write both `"12"` and `12`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl RawId {
    fn resolve(self) -> Result<EntityId, LoadError> {
        match self {
            RawId::Number(n) => Ok(EntityId(n)),
            RawId::Text(s) => parse_id(&s),
        }
    }
}

fn parse_id(text: &str) -> Result<EntityId, LoadError> {
    text.trim()
        .parse::<u64>()
        .map(EntityId)
        .map_err(|_| LoadError::InvalidId(text.to_owned()))
}

fn parse_edge_key(key: &str) -> Result<(EntityId, EntityId), LoadError> {
    let (a, b) = key
        .split_once('-')
        .ok_or_else(|| LoadError::InvalidEdgeKey(key.to_owned()))?;
    let a = parse_id(a).map_err(|_| LoadError::InvalidEdgeKey(key.to_owned()))?;
    let b = parse_id(b).map_err(|_| LoadError::InvalidEdgeKey(key.to_owned()))?;
    Ok((a, b))
}

impl EntityGraph {
    /// Builds a graph from the split adjacency + edge-metadata layout.
    ///
    /// A neighbor without a metadata entry is kept with no edge
    /// classifications: it still counts as adjacent, but never as concave.
    /// Metadata for pairs the adjacency does not list is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if either document is not valid JSON of the
    /// expected shape, or if an id or edge key cannot be parsed.
    pub fn from_adjacency_json(adjacency: &str, metadata: &str) -> Result<Self, LoadError> {
        let raw_adjacency: HashMap<String, Vec<RawId>> = serde_json::from_str(adjacency)?;
        let raw_metadata: HashMap<String, Vec<EdgeClass>> = serde_json::from_str(metadata)?;

        let mut classes: HashMap<(EntityId, EntityId), Vec<EdgeClass>> =
            HashMap::with_capacity(raw_metadata.len());
        for (key, codes) in raw_metadata {
            classes.entry(parse_edge_key(&key)?).or_default().extend(codes);
        }

        let mut records: BTreeMap<EntityId, EntityData> = BTreeMap::new();
        for (key, neighbors) in raw_adjacency {
            let id = parse_id(&key)?;
            let entity = records.entry(id).or_insert_with(|| EntityData::new(id));
            for raw in neighbors {
                let neighbor = raw.resolve()?;
                let codes = classes.remove(&(id, neighbor)).unwrap_or_default();
                entity.neighbors.entry(neighbor).or_default().extend(codes);
            }
        }

        if !classes.is_empty() {
            tracing::debug!(
                unused = classes.len(),
                "edge metadata entries without a matching adjacency record"
            );
        }

        Ok(Self::from_entities(records.into_values().collect()))
    }

    /// Parses the native JSON form.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes to the native JSON form.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, LoadError> {
        Ok(serde_json::to_string(self)?)
    }
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads the split adjacency layout from two files.
///
/// # Errors
///
/// Returns an error if a file cannot be read or parsed.
pub fn load_adjacency_files(
    adjacency: impl AsRef<Path>,
    metadata: impl AsRef<Path>,
) -> Result<EntityGraph, LoadError> {
    let adjacency = read(adjacency.as_ref())?;
    let metadata = read(metadata.as_ref())?;
    EntityGraph::from_adjacency_json(&adjacency, &metadata)
}

/// Reads a graph stored in the native JSON form.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_graph_file(path: impl AsRef<Path>) -> Result<EntityGraph, LoadError> {
    EntityGraph::from_json(&read(path.as_ref())?)
}
