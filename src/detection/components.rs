use std::collections::VecDeque;

use crate::error::DetectionError;

use super::cancel::CancelToken;
use super::subgraph::ConcaveSubgraph;

/// Connected components of the concave subgraph.
///
/// Cluster ids follow the order in which BFS seeds were taken (ascending
/// face id); members are stored in discovery order.
#[derive(Debug, Clone, Default)]
pub struct Clusters {
    cluster_of: Vec<Option<usize>>,
    members: Vec<Vec<usize>>,
}

impl Clusters {
    /// Cluster of a face. `None` for the hub.
    #[must_use]
    pub fn cluster_of(&self, index: usize) -> Option<usize> {
        self.cluster_of.get(index).copied().flatten()
    }

    /// Members of a cluster in discovery order.
    #[must_use]
    pub fn members(&self, cluster: usize) -> &[usize] {
        self.members.get(cluster).map_or(&[], Vec::as_slice)
    }

    /// Number of clusters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if there are no clusters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Face count and member lists, consuming the clusters.
    pub(crate) fn into_parts(self) -> (usize, Vec<Vec<usize>>) {
        (self.cluster_of.len(), self.members)
    }
}

/// Partitions every non-hub face into concave-connected clusters.
///
/// Faces without concave neighbors become singleton clusters.
///
/// # Errors
///
/// Returns [`DetectionError::Cancelled`] if `cancel` fires mid-traversal.
pub fn find_clusters(
    subgraph: &ConcaveSubgraph,
    cancel: &CancelToken,
) -> Result<Clusters, DetectionError> {
    let n = subgraph.len();
    let mut visited = vec![false; n];
    if let Some(hub) = subgraph.hub() {
        visited[hub] = true;
    }

    let mut cluster_of: Vec<Option<usize>> = vec![None; n];
    let mut members: Vec<Vec<usize>> = Vec::new();
    let mut queue = VecDeque::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }
        cancel.check()?;

        let cluster = members.len();
        visited[start] = true;
        cluster_of[start] = Some(cluster);
        let mut component = vec![start];
        queue.push_back(start);

        while let Some(curr) = queue.pop_front() {
            for &neighbor in subgraph.neighbors(curr) {
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    cluster_of[neighbor] = Some(cluster);
                    component.push(neighbor);
                    queue.push_back(neighbor);
                }
            }
        }

        members.push(component);
    }

    Ok(Clusters {
        cluster_of,
        members,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::graph::{EdgeClass, EntityGraph, EntityId, IndexedGraph};

    fn clusters_of(graph: &EntityGraph) -> (IndexedGraph, ConcaveSubgraph, Clusters) {
        let indexed = IndexedGraph::build(graph, EdgeClass::CONCAVE).unwrap();
        let sub = ConcaveSubgraph::build(&indexed);
        let clusters = find_clusters(&sub, &CancelToken::new()).unwrap();
        (indexed, sub, clusters)
    }

    fn ids(indexed: &IndexedGraph, members: &[usize]) -> Vec<u64> {
        members.iter().map(|&m| indexed.id(m).0).collect()
    }

    /// Hub 1 touching everything, a concave chain 2-3-4 and a lone face 5.
    fn chain() -> EntityGraph {
        let mut g = EntityGraph::new();
        for n in 2..=5 {
            g.connect(EntityId(1), EntityId(n), EdgeClass::CONVEX);
        }
        g.connect(EntityId(4), EntityId(3), EdgeClass::CONCAVE);
        g.connect(EntityId(3), EntityId(2), EdgeClass::CONCAVE);
        g
    }

    #[test]
    fn chain_forms_one_cluster() {
        let (idx, sub, clusters) = clusters_of(&chain());
        assert_eq!(clusters.len(), 2);
        assert_eq!(ids(&idx, clusters.members(0)), vec![2, 3, 4]);
        assert_eq!(ids(&idx, clusters.members(1)), vec![5]);
        assert_eq!(clusters.cluster_of(sub.hub().unwrap()), None);
    }

    #[test]
    fn members_follow_discovery_order() {
        let mut g = EntityGraph::new();
        for n in 2..=6 {
            g.connect(EntityId(1), EntityId(n), EdgeClass::CONVEX);
        }
        g.connect(EntityId(2), EntityId(6), EdgeClass::CONCAVE);
        g.connect(EntityId(6), EntityId(3), EdgeClass::CONCAVE);
        g.connect(EntityId(2), EntityId(5), EdgeClass::CONCAVE);
        let (idx, _, clusters) = clusters_of(&g);
        assert_eq!(ids(&idx, clusters.members(0)), vec![2, 5, 6, 3]);
        assert_eq!(ids(&idx, clusters.members(1)), vec![4]);
    }

    #[test]
    fn every_non_hub_face_is_clustered_once() {
        let (idx, sub, clusters) = clusters_of(&chain());
        let total: usize = (0..clusters.len()).map(|c| clusters.members(c).len()).sum();
        assert_eq!(total, idx.len() - 1);
        for i in 0..idx.len() {
            assert_eq!(clusters.cluster_of(i).is_none(), Some(i) == sub.hub());
        }
    }

    #[test]
    fn cancelled_token_stops_traversal() {
        let indexed = IndexedGraph::build(&chain(), EdgeClass::CONCAVE).unwrap();
        let sub = ConcaveSubgraph::build(&indexed);
        let token = CancelToken::new();
        token.cancel();
        assert!(matches!(
            find_clusters(&sub, &token),
            Err(DetectionError::Cancelled)
        ));
    }
}
