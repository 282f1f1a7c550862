//! Sampling loop
//!
//! Fixed-cadence driver: every 100 ms it pulls the current frame, runs
//! detection, repaints the overlay, and evaluates the auto-trigger. Ticks
//! are skipped while the frame source or detector is not ready, and missed
//! ticks coalesce instead of queueing when detection runs long.
//!
//! Cancellation is total: the task is aborted and a generation counter
//! guards against an in-flight detection result landing after the loop was
//! replaced. Exactly one loop generation is live at a time.

use crate::detect::DetectorSlot;
use crate::overlay::renderer::{render, OverlayCanvas};
use crate::recorder::{CaptureRecorder, StartOptions};
use crate::settings::SettingsHandle;
use crate::source::FrameSource;
use crate::trigger::should_trigger;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Sampling cadence, measured from loop start
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Overlay surface shared between the loop and the session
pub type SharedCanvas = Arc<Mutex<Box<dyn OverlayCanvas>>>;

/// Everything one loop generation needs
pub struct SamplerDeps {
    pub source: Arc<dyn FrameSource>,
    pub detector: DetectorSlot,
    pub canvas: SharedCanvas,
    pub settings: SettingsHandle,
    pub recorder: CaptureRecorder,
}

/// Owned handle to a running sampling loop
///
/// Dropping the handle without `cancel` leaves the loop running; the
/// session is responsible for cancelling before re-establishing.
pub struct LoopHandle {
    generation: Arc<AtomicU64>,
    task: JoinHandle<()>,
}

impl LoopHandle {
    /// Stop the loop: no further ticks fire and any in-flight detection
    /// result is discarded by the generation guard.
    pub fn cancel(self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.task.abort();
        tracing::debug!("Sampling loop cancelled");
    }
}

/// Spawn a new loop generation
///
/// Bumps the shared generation counter first, which also invalidates any
/// still-running previous loop's pending results.
pub fn spawn(deps: SamplerDeps, generation: Arc<AtomicU64>) -> LoopHandle {
    let my_gen = generation.fetch_add(1, Ordering::SeqCst) + 1;
    let gen_counter = generation.clone();

    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tracing::info!("Sampling loop started (generation {my_gen})");

        loop {
            interval.tick().await;
            tick(&deps, &gen_counter, my_gen).await;
        }
    });

    LoopHandle { generation, task }
}

async fn tick(deps: &SamplerDeps, generation: &AtomicU64, my_gen: u64) {
    let Some(frame) = deps.source.current_frame() else {
        tracing::trace!("Tick skipped: frame source not ready");
        return;
    };
    if !frame.is_ready() {
        tracing::trace!("Tick skipped: no valid frame dimensions");
        return;
    }
    let Some(detector) = deps.detector.get() else {
        tracing::trace!("Tick skipped: detector not loaded");
        return;
    };

    let batch = match detector.detect(&frame).await {
        Ok(batch) => batch,
        Err(e) => {
            // Recoverable: one bad tick becomes an empty batch.
            tracing::warn!("Detection failed, continuing: {e}");
            Vec::new()
        }
    };

    // Stale-result guard: the loop may have been replaced while detection
    // was in flight.
    if generation.load(Ordering::SeqCst) != my_gen {
        tracing::debug!("Discarding detection result from stale loop generation");
        return;
    }

    let settings = deps.settings.snapshot();
    {
        let mut canvas = deps.canvas.lock();
        render(&mut **canvas, frame.size(), &batch, settings.mirrored);
    }

    if should_trigger(&batch, &settings) {
        // Idempotent while recording: the recorder's start guard absorbs
        // repeated person ticks.
        if let Err(e) = deps.recorder.start(StartOptions::auto()).await {
            tracing::warn!("Auto-triggered start failed: {e}");
        }
    }
}
