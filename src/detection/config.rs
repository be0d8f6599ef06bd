use serde::{Deserialize, Serialize};

use crate::error::DetectionError;
use crate::graph::EdgeClass;

/// Parameters controlling pocket detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectConfig {
    /// Smallest concave cluster kept as a pocket seed. Smaller clusters
    /// (isolated faces and pairs with the default of 3) are noise.
    pub min_cluster_size: usize,
    /// Edge classification treated as concave.
    pub concave: EdgeClass,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            min_cluster_size: 3,
            concave: EdgeClass::CONCAVE,
        }
    }
}

impl DetectConfig {
    /// Sets the minimum cluster size.
    #[must_use]
    pub fn with_min_cluster_size(mut self, min_cluster_size: usize) -> Self {
        self.min_cluster_size = min_cluster_size;
        self
    }

    /// Sets the classification code treated as concave.
    #[must_use]
    pub fn with_concave(mut self, concave: EdgeClass) -> Self {
        self.concave = concave;
        self
    }

    /// Checks the parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_cluster_size` is below 2. A single face
    /// has no concave edge inside its cluster and is never a pocket.
    pub fn validate(&self) -> Result<(), DetectionError> {
        if self.min_cluster_size < 2 {
            return Err(DetectionError::InvalidConfig(format!(
                "min_cluster_size must be at least 2, got {}",
                self.min_cluster_size
            )));
        }
        Ok(())
    }
}
