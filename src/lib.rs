//! Pocket detection over the face-adjacency graph of a solid model.
//!
//! A pocket is a contiguous group of concave faces: a machined cavity,
//! recess or hole. [`detect_pockets`] turns an [`EntityGraph`] into a
//! [`PocketMap`] from face id to pocket id.
//!
//! ```
//! use pocketry::{detect_pockets, EdgeClass, EntityGraph, EntityId, PocketId};
//!
//! let mut graph = EntityGraph::new();
//! for face in [2, 3, 4] {
//!     graph.connect(EntityId(1), EntityId(face), EdgeClass::CONVEX);
//! }
//! graph.connect(EntityId(2), EntityId(3), EdgeClass::CONCAVE);
//! graph.connect(EntityId(3), EntityId(4), EdgeClass::CONCAVE);
//!
//! let pockets = detect_pockets(&graph).unwrap();
//! assert_eq!(pockets.get(EntityId(3)), Some(PocketId(0)));
//! assert!(!pockets.contains(EntityId(1)));
//! ```

pub mod detection;
pub mod error;
pub mod graph;
pub mod pocket_map;

pub use detection::{detect_pockets, DetectConfig, DetectPockets, DetectionWorker};
pub use error::{PocketError, Result};
pub use graph::{EdgeClass, EntityData, EntityGraph, EntityId};
pub use pocket_map::{Pocket, PocketId, PocketMap};
