mod cancel;
mod components;
mod config;
mod engine;
mod filter;
mod merge;
mod subgraph;
mod union_find;
mod worker;


pub use cancel::CancelToken;
pub use components::{find_clusters, Clusters};
pub use config::DetectConfig;
pub use engine::{detect_pockets, DetectPockets};
pub use filter::{filter_clusters, FilteredClusters};
pub use merge::merge_clusters;
pub use subgraph::ConcaveSubgraph;
pub use union_find::DisjointSet;
pub use worker::{DetectionStatus, DetectionWorker};
