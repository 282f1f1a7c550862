//! Detector adapter
//!
//! Wraps whatever runs the actual model behind a small async trait, plus a
//! slot for deferred installation: model loading is slow and may fail, so
//! the engine starts ticking before a detector exists and skips detection
//! until one is installed.

use crate::detect::types::DetectionBatch;
use crate::source::Frame;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use thiserror::Error;

/// Failure of a single detection invocation
///
/// Always recoverable: the sampling loop treats it as an empty batch for
/// that tick and keeps going.
#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("detector backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

/// Asynchronous object detection capability
///
/// Implementations may suspend while the underlying model runs and must be
/// safely callable repeatedly.
#[async_trait]
pub trait ObjectDetector: Send + Sync {
    async fn detect(&self, frame: &Frame) -> Result<DetectionBatch, DetectorError>;
}

/// Shared slot holding the detector once loading completes
///
/// Empty until `install` is called; `get` returning `None` means "not
/// ready" and callers skip the tick rather than waiting.
#[derive(Clone, Default)]
pub struct DetectorSlot {
    inner: Arc<RwLock<Option<Arc<dyn ObjectDetector>>>>,
}

impl DetectorSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a loaded detector, replacing any previous one
    pub fn install(&self, detector: Arc<dyn ObjectDetector>) {
        tracing::info!("Detector installed");
        *self.inner.write() = Some(detector);
    }

    /// Current detector, or `None` while loading
    pub fn get(&self) -> Option<Arc<dyn ObjectDetector>> {
        self.inner.read().clone()
    }

    pub fn is_ready(&self) -> bool {
        self.inner.read().is_some()
    }
}
