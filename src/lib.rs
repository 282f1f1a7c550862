//! sentrycam - detection-driven live capture.
//!
//! Samples a live frame source at a fixed cadence, runs object detection
//! on each sampled frame, paints labeled boxes onto an overlay canvas, and
//! records clips either on user request or automatically when a person is
//! detected. The camera, detection model, media encoder and storage are
//! injected capabilities; this crate owns the temporal logic between them.

pub mod detect;
pub mod feedback;
pub mod overlay;
pub mod pipeline;
pub mod recorder;
pub mod save;
pub mod session;
pub mod settings;
pub mod source;
pub mod trigger;
pub mod utils;

pub use detect::{BoundingBox, Detection, DetectionBatch, DetectorSlot, ObjectDetector};
pub use feedback::{CpalBeeper, FeedbackCue};
pub use overlay::{OverlayCanvas, RasterOverlay};
pub use recorder::{CaptureRecorder, MediaSink, RecorderState, MAX_CLIP_DURATION};
pub use save::{DiskSink, SaveSink};
pub use session::{CameraSession, SessionConfig, SessionEvent};
pub use settings::{Settings, SettingsHandle};
pub use source::{Frame, FrameSource};
pub use utils::error::{CamError, CamResult};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging for an embedding application
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sentrycam=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("sentrycam v{} ready", env!("CARGO_PKG_VERSION"));
}
