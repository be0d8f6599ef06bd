use std::collections::BTreeMap;

use crate::error::DetectionError;
use crate::graph::IndexedGraph;
use crate::pocket_map::{PocketId, PocketMap};

use super::cancel::CancelToken;
use super::filter::FilteredClusters;
use super::union_find::DisjointSet;

/// Joins surviving clusters that touch through any edge and numbers the
/// resulting pockets.
///
/// Every neighbor record of the full graph counts, whatever its
/// classification: two concave islands separated by a flat or convex seam
/// are the same cavity. Pocket ids are handed out in the order their
/// representative is first met, walking clusters in order and members in
/// discovery order.
///
/// # Errors
///
/// Returns [`DetectionError::Cancelled`] if `cancel` fires mid-merge.
pub fn merge_clusters(
    graph: &IndexedGraph,
    filtered: &FilteredClusters,
    cancel: &CancelToken,
) -> Result<PocketMap, DetectionError> {
    let mut sets = DisjointSet::new(filtered.len());
    let mut unions = 0usize;

    for a in 0..graph.len() {
        let Some(cluster_a) = filtered.cluster_of(a) else {
            continue;
        };
        cancel.check()?;
        for neighbor in graph.neighbors(a) {
            let Some(cluster_b) = filtered.cluster_of(neighbor.index) else {
                continue;
            };
            if cluster_a != cluster_b && sets.union(cluster_a, cluster_b) {
                unions += 1;
            }
        }
    }
    tracing::debug!(clusters = filtered.len(), unions, "merged touching clusters");

    let mut pocket_of_root: Vec<Option<PocketId>> = vec![None; filtered.len()];
    let mut next = 0usize;
    let mut assignments = BTreeMap::new();

    for (cluster, members) in filtered.iter() {
        let root = sets.find(cluster);
        let pocket = if let Some(pocket) = pocket_of_root[root] {
            pocket
        } else {
            let pocket = PocketId(next);
            next += 1;
            pocket_of_root[root] = Some(pocket);
            pocket
        };
        for &face in members {
            assignments.insert(graph.id(face), pocket);
        }
    }

    Ok(PocketMap::from_assignments(assignments))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::detection::components::find_clusters;
    use crate::detection::filter::filter_clusters;
    use crate::detection::subgraph::ConcaveSubgraph;
    use crate::graph::{EdgeClass, EntityGraph, EntityId};

    fn triangle(g: &mut EntityGraph, a: u64, b: u64, c: u64) {
        g.connect(EntityId(a), EntityId(b), EdgeClass::CONCAVE);
        g.connect(EntityId(b), EntityId(c), EdgeClass::CONCAVE);
        g.connect(EntityId(c), EntityId(a), EdgeClass::CONCAVE);
    }

    fn run(g: &EntityGraph) -> PocketMap {
        let indexed = IndexedGraph::build(g, EdgeClass::CONCAVE).unwrap();
        let sub = ConcaveSubgraph::build(&indexed);
        let token = CancelToken::new();
        let clusters = find_clusters(&sub, &token).unwrap();
        let filtered = filter_clusters(clusters, 3);
        merge_clusters(&indexed, &filtered, &token).unwrap()
    }

    fn hub_over(g: &mut EntityGraph, faces: &[u64]) {
        for &f in faces {
            g.connect(EntityId(1), EntityId(f), EdgeClass::CONVEX);
        }
    }

    #[test]
    fn separate_islands_stay_separate() {
        let mut g = EntityGraph::new();
        hub_over(&mut g, &[2, 3, 6, 7, 8, 9]);
        triangle(&mut g, 2, 3, 6);
        triangle(&mut g, 7, 8, 9);
        let map = run(&g);
        assert_eq!(map.pocket_count(), 2);
        assert_eq!(map.get(EntityId(2)), Some(PocketId(0)));
        assert_eq!(map.get(EntityId(9)), Some(PocketId(1)));
    }

    #[test]
    fn convex_seam_merges_islands() {
        let mut g = EntityGraph::new();
        hub_over(&mut g, &[2, 3, 6, 7, 8, 9]);
        triangle(&mut g, 2, 3, 6);
        triangle(&mut g, 7, 8, 9);
        g.connect(EntityId(6), EntityId(7), EdgeClass::CONVEX);
        let map = run(&g);
        assert_eq!(map.pocket_count(), 1);
        assert_eq!(map.len(), 6);
    }

    #[test]
    fn merge_is_transitive_across_chain() {
        let mut g = EntityGraph::new();
        hub_over(&mut g, &[2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13]);
        triangle(&mut g, 2, 3, 4);
        triangle(&mut g, 5, 6, 7);
        triangle(&mut g, 8, 9, 10);
        triangle(&mut g, 11, 12, 13);
        g.connect(EntityId(10), EntityId(11), EdgeClass::SMOOTH);
        g.connect(EntityId(4), EntityId(5), EdgeClass::CONVEX);
        let map = run(&g);
        assert_eq!(map.pocket_count(), 2);
        assert_eq!(map.get(EntityId(2)), map.get(EntityId(7)));
        assert_eq!(map.get(EntityId(8)), map.get(EntityId(13)));
        assert_ne!(map.get(EntityId(2)), map.get(EntityId(8)));
    }

    #[test]
    fn filtered_out_faces_do_not_bridge() {
        let mut g = EntityGraph::new();
        hub_over(&mut g, &[2, 3, 6, 7, 8, 9, 20, 21]);
        triangle(&mut g, 2, 3, 6);
        triangle(&mut g, 7, 8, 9);
        g.connect(EntityId(20), EntityId(21), EdgeClass::CONCAVE);
        g.connect(EntityId(6), EntityId(20), EdgeClass::CONVEX);
        g.connect(EntityId(21), EntityId(7), EdgeClass::CONVEX);
        let map = run(&g);
        assert_eq!(map.pocket_count(), 2);
        assert!(!map.contains(EntityId(20)));
    }

    #[test]
    fn hub_does_not_bridge() {
        let mut g = EntityGraph::new();
        hub_over(&mut g, &[2, 3, 6, 7, 8, 9]);
        triangle(&mut g, 2, 3, 6);
        triangle(&mut g, 7, 8, 9);
        let map = run(&g);
        assert!(!map.contains(EntityId(1)));
        assert_ne!(map.get(EntityId(6)), map.get(EntityId(7)));
    }
}
