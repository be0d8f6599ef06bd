use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::Mutex;

use crate::error::{DetectionError, PocketError};
use crate::graph::EntityGraph;
use crate::pocket_map::PocketMap;

use super::cancel::CancelToken;
use super::config::DetectConfig;
use super::engine::DetectPockets;

/// State of the most recent detection request.
#[derive(Debug, Clone, Default)]
pub enum DetectionStatus {
    /// Nothing requested, or the last result was cleared.
    #[default]
    Idle,
    /// A detection is running.
    Running { generation: u64 },
    /// The latest request finished.
    Ready {
        generation: u64,
        pockets: Arc<PocketMap>,
    },
    /// The latest request failed.
    Failed { generation: u64, message: String },
}

/// Runs detections off the calling thread; the latest request wins.
///
/// Each request supersedes the previous one: a superseded run stops at its
/// next cancellation point and its result, if any, is discarded. The
/// published [`PocketMap`] is replaced as a whole, never edited.
#[derive(Debug)]
pub struct DetectionWorker {
    detector: DetectPockets,
    generation: Arc<AtomicU64>,
    status: Arc<Mutex<DetectionStatus>>,
}

impl Default for DetectionWorker {
    fn default() -> Self {
        Self::new(DetectConfig::default())
    }
}

impl DetectionWorker {
    /// Creates an idle worker.
    #[must_use]
    pub fn new(config: DetectConfig) -> Self {
        Self {
            detector: DetectPockets::new(config),
            generation: Arc::new(AtomicU64::new(0)),
            status: Arc::new(Mutex::new(DetectionStatus::Idle)),
        }
    }

    /// Starts a detection on a background thread and returns its handle.
    pub fn request(&self, graph: Arc<EntityGraph>) -> JoinHandle<()> {
        let token = {
            let mut status = self.status.lock();
            let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
            *status = DetectionStatus::Running { generation };
            CancelToken::for_generation(generation, Arc::clone(&self.generation))
        };

        let detector = self.detector;
        let status = Arc::clone(&self.status);
        std::thread::spawn(move || {
            let result = detector.execute_with(&graph, &token);
            let mut status = status.lock();
            if token.is_cancelled() {
                tracing::debug!("discarding superseded detection");
                return;
            }
            let generation = token.generation();
            *status = match result {
                Ok(pockets) => DetectionStatus::Ready {
                    generation,
                    pockets: Arc::new(pockets),
                },
                Err(PocketError::Detection(DetectionError::Cancelled)) => return,
                Err(err) => {
                    tracing::warn!(generation, "pocket detection failed: {err}");
                    DetectionStatus::Failed {
                        generation,
                        message: err.to_string(),
                    }
                }
            };
        })
    }

    /// Snapshot of the current status.
    #[must_use]
    pub fn status(&self) -> DetectionStatus {
        self.status.lock().clone()
    }

    /// The latest published pocket map, if any.
    #[must_use]
    pub fn latest(&self) -> Option<Arc<PocketMap>> {
        match &*self.status.lock() {
            DetectionStatus::Ready { pockets, .. } => Some(Arc::clone(pockets)),
            _ => None,
        }
    }

    /// Cancels any running detection and drops the published result.
    pub fn clear(&self) {
        let mut status = self.status.lock();
        self.generation.fetch_add(1, Ordering::AcqRel);
        *status = DetectionStatus::Idle;
    }
}
