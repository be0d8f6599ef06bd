use crate::error::Result;
use crate::graph::{EntityGraph, IndexedGraph};
use crate::pocket_map::PocketMap;

use super::cancel::CancelToken;
use super::components::find_clusters;
use super::config::DetectConfig;
use super::filter::filter_clusters;
use super::merge::merge_clusters;
use super::subgraph::ConcaveSubgraph;

/// Finds pockets in a face-adjacency graph.
///
/// Runs the full pipeline on every call: index the graph, drop the hub
/// and non-concave edges, cluster by BFS, filter small clusters, merge
/// clusters that touch. Holds no state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetectPockets {
    config: DetectConfig,
}

impl DetectPockets {
    /// Creates a new `DetectPockets` operation.
    #[must_use]
    pub fn new(config: DetectConfig) -> Self {
        Self { config }
    }

    /// The parameters this operation runs with.
    #[must_use]
    pub fn config(&self) -> &DetectConfig {
        &self.config
    }

    /// Executes detection on a graph snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the graph
    /// repeats an entity id.
    pub fn execute(&self, graph: &EntityGraph) -> Result<PocketMap> {
        self.execute_with(graph, &CancelToken::new())
    }

    /// Executes detection, giving up once `cancel` fires.
    ///
    /// # Errors
    ///
    /// Same as [`DetectPockets::execute`], plus
    /// [`DetectionError::Cancelled`](crate::error::DetectionError::Cancelled).
    pub fn execute_with(&self, graph: &EntityGraph, cancel: &CancelToken) -> Result<PocketMap> {
        self.config.validate()?;

        // Step 1: Dense snapshot
        let indexed = IndexedGraph::build(graph, self.config.concave)?;
        if indexed.is_empty() {
            return Ok(PocketMap::new());
        }
        cancel.check()?;

        // Step 2: Concave subgraph without the hub
        let subgraph = ConcaveSubgraph::build(&indexed);
        tracing::debug!(
            faces = indexed.len(),
            hub = ?subgraph.hub().map(|h| indexed.id(h)),
            concave_edges = subgraph.edge_count(),
            "built concave subgraph"
        );
        if subgraph.edge_count() == 0 {
            return Ok(PocketMap::new());
        }
        cancel.check()?;

        // Step 3: Connected components
        let clusters = find_clusters(&subgraph, cancel)?;
        let raw = clusters.len();

        // Step 4: Size filter
        let filtered = filter_clusters(clusters, self.config.min_cluster_size);
        tracing::debug!(raw, kept = filtered.len(), "filtered concave clusters");
        if filtered.is_empty() {
            return Ok(PocketMap::new());
        }
        cancel.check()?;

        // Step 5: Merge touching clusters
        let pockets = merge_clusters(&indexed, &filtered, cancel)?;
        tracing::info!(
            faces = pockets.len(),
            pockets = pockets.pocket_count(),
            "pocket detection finished"
        );
        Ok(pockets)
    }
}

/// Detects pockets with the default configuration.
///
/// # Errors
///
/// Returns an error if the graph repeats an entity id.
pub fn detect_pockets(graph: &EntityGraph) -> Result<PocketMap> {
    DetectPockets::default().execute(graph)
}
