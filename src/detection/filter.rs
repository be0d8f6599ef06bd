use super::components::Clusters;

/// Clusters that passed the size filter, renumbered from zero.
#[derive(Debug, Clone, Default)]
pub struct FilteredClusters {
    cluster_of: Vec<Option<usize>>,
    members: Vec<Vec<usize>>,
}

impl FilteredClusters {
    /// Surviving cluster of a face, if any.
    #[must_use]
    pub fn cluster_of(&self, index: usize) -> Option<usize> {
        self.cluster_of.get(index).copied().flatten()
    }

    /// Members of a surviving cluster in discovery order.
    #[must_use]
    pub fn members(&self, cluster: usize) -> &[usize] {
        self.members.get(cluster).map_or(&[], Vec::as_slice)
    }

    /// Iterates `(cluster, members)` in cluster order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> + '_ {
        self.members
            .iter()
            .enumerate()
            .map(|(cluster, members)| (cluster, members.as_slice()))
    }

    /// Number of surviving clusters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if every cluster was filtered out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Drops clusters with fewer than `min_size` members.
///
/// Survivors keep their relative order and get contiguous ids.
#[must_use]
pub fn filter_clusters(clusters: Clusters, min_size: usize) -> FilteredClusters {
    let (face_count, components) = clusters.into_parts();
    let mut cluster_of: Vec<Option<usize>> = vec![None; face_count];
    let mut members: Vec<Vec<usize>> = Vec::new();

    for component in components {
        if component.len() < min_size {
            continue;
        }
        let id = members.len();
        for &face in &component {
            cluster_of[face] = Some(id);
        }
        members.push(component);
    }

    FilteredClusters {
        cluster_of,
        members,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::detection::cancel::CancelToken;
    use crate::detection::components::find_clusters;
    use crate::detection::subgraph::ConcaveSubgraph;
    use crate::graph::{EdgeClass, EntityGraph, EntityId, IndexedGraph};

    /// Hub 1; concave pair 2-3, concave triangle 4-5-6, concave pair 7-8.
    fn graph() -> (IndexedGraph, Clusters) {
        let mut g = EntityGraph::new();
        for n in 2..=8 {
            g.connect(EntityId(1), EntityId(n), EdgeClass::CONVEX);
        }
        g.connect(EntityId(2), EntityId(3), EdgeClass::CONCAVE);
        g.connect(EntityId(4), EntityId(5), EdgeClass::CONCAVE);
        g.connect(EntityId(5), EntityId(6), EdgeClass::CONCAVE);
        g.connect(EntityId(6), EntityId(4), EdgeClass::CONCAVE);
        g.connect(EntityId(7), EntityId(8), EdgeClass::CONCAVE);
        let indexed = IndexedGraph::build(&g, EdgeClass::CONCAVE).unwrap();
        let sub = ConcaveSubgraph::build(&indexed);
        let clusters = find_clusters(&sub, &CancelToken::new()).unwrap();
        (indexed, clusters)
    }

    #[test]
    fn pairs_are_noise() {
        let (idx, clusters) = graph();
        assert_eq!(clusters.len(), 3);
        let filtered = filter_clusters(clusters, 3);
        assert_eq!(filtered.len(), 1);
        let ids: Vec<u64> = filtered.members(0).iter().map(|&m| idx.id(m).0).collect();
        assert_eq!(ids, vec![4, 5, 6]);
        assert_eq!(filtered.cluster_of(idx.index_of(EntityId(2)).unwrap()), None);
        assert_eq!(filtered.cluster_of(idx.index_of(EntityId(5)).unwrap()), Some(0));
    }

    #[test]
    fn survivors_keep_order() {
        let (idx, clusters) = graph();
        let filtered = filter_clusters(clusters, 2);
        assert_eq!(filtered.len(), 3);
        let first: Vec<u64> = filtered.members(0).iter().map(|&m| idx.id(m).0).collect();
        let last: Vec<u64> = filtered.members(2).iter().map(|&m| idx.id(m).0).collect();
        assert_eq!(first, vec![2, 3]);
        assert_eq!(last, vec![7, 8]);
    }

    #[test]
    fn everything_filtered() {
        let (_, clusters) = graph();
        let filtered = filter_clusters(clusters, 4);
        assert!(filtered.is_empty());
        assert_eq!(filtered.iter().count(), 0);
    }
}
