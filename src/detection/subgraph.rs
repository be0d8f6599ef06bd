use crate::graph::IndexedGraph;

/// Concave-only adjacency with the hub face removed.
///
/// The hub is the face with the most neighbors, taken to be the base
/// surface the pockets are cut into. Ties go to the smallest id.
#[derive(Debug, Clone, Default)]
pub struct ConcaveSubgraph {
    hub: Option<usize>,
    adjacency: Vec<Vec<usize>>,
}

impl ConcaveSubgraph {
    /// Restricts `graph` to concave edges between non-hub faces.
    ///
    /// A concave record in either endpoint's own list connects both ways;
    /// no edge is added that neither record names.
    #[must_use]
    pub fn build(graph: &IndexedGraph) -> Self {
        let hub = find_hub(graph);
        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); graph.len()];

        for a in 0..graph.len() {
            if Some(a) == hub {
                continue;
            }
            for neighbor in graph.neighbors(a) {
                let b = neighbor.index;
                if !neighbor.concave || Some(b) == hub {
                    continue;
                }
                adjacency[a].push(b);
                adjacency[b].push(a);
            }
        }

        for list in &mut adjacency {
            list.sort_unstable();
            list.dedup();
        }

        Self { hub, adjacency }
    }

    /// Dense index of the hub face, or `None` for an empty graph.
    #[must_use]
    pub fn hub(&self) -> Option<usize> {
        self.hub
    }

    /// Number of faces, hub included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns `true` if the subgraph has no faces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Concave neighbors of a face, ascending. Always empty for the hub.
    #[must_use]
    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.adjacency.get(index).map_or(&[], Vec::as_slice)
    }

    /// Number of undirected concave edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }
}

/// Highest-degree face; the first one in ascending id order wins ties.
fn find_hub(graph: &IndexedGraph) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for index in 0..graph.len() {
        let degree = graph.degree(index);
        if best.is_none_or(|(_, d)| degree > d) {
            best = Some((index, degree));
        }
    }
    best.map(|(index, _)| index)
}
