//! Camera session
//!
//! Top-level wiring: owns the sampling-loop lifecycle, routes user actions
//! (record toggle, screenshot, settings changes) and fans out session
//! events to the embedding UI. The frame source and media sink are
//! referenced, never closed — their lifecycle belongs to the embedder.

use crate::detect::DetectorSlot;
use crate::feedback::FeedbackCue;
use crate::overlay::renderer::OverlayCanvas;
use crate::pipeline::{self, LoopHandle, SamplerDeps, SharedCanvas};
use crate::recorder::{CaptureRecorder, Clip, MediaSink, RecorderState, StartOptions};
use crate::save::{encode_png, still_filename, SaveSink};
use crate::settings::{Settings, SettingsHandle};
use crate::source::FrameSource;
use crate::utils::error::{CamError, CamResult};
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Events emitted during a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "type")]
pub enum SessionEvent {
    /// A recording began
    RecordingStarted { auto_triggered: bool },
    /// A recording finished and its clip was saved
    RecordingStopped { filename: String, duration_ms: u64 },
    /// A still was captured and saved
    ScreenshotSaved { filename: String },
    /// User-visible notice (recoverable problems, toggle confirmations)
    Notice { message: String },
}

/// External collaborators a session is built from
pub struct SessionConfig {
    pub source: Arc<dyn FrameSource>,
    pub sink: Arc<dyn MediaSink>,
    pub save: Arc<dyn SaveSink>,
    pub cue: Arc<dyn FeedbackCue>,
    pub canvas: Box<dyn OverlayCanvas>,
    pub settings: Settings,
}

/// Live capture session
pub struct CameraSession {
    source: RwLock<Arc<dyn FrameSource>>,
    detector: DetectorSlot,
    canvas: SharedCanvas,
    settings: SettingsHandle,
    recorder: CaptureRecorder,
    cue: Arc<dyn FeedbackCue>,
    save: Arc<dyn SaveSink>,
    event_tx: broadcast::Sender<SessionEvent>,
    generation: Arc<AtomicU64>,
    loop_handle: Mutex<Option<LoopHandle>>,
}

impl CameraSession {
    pub fn new(config: SessionConfig) -> Self {
        let (event_tx, _) = broadcast::channel(64);
        let settings = SettingsHandle::new(config.settings);
        let recorder = CaptureRecorder::new(
            config.sink,
            config.save.clone(),
            config.cue.clone(),
            settings.clone(),
            event_tx.clone(),
        );

        Self {
            source: RwLock::new(config.source),
            detector: DetectorSlot::new(),
            canvas: Arc::new(Mutex::new(config.canvas)),
            settings,
            recorder,
            cue: config.cue,
            save: config.save,
            event_tx,
            generation: Arc::new(AtomicU64::new(0)),
            loop_handle: Mutex::new(None),
        }
    }

    /// Slot to install the detector into once its backend has loaded
    pub fn detector_slot(&self) -> DetectorSlot {
        self.detector.clone()
    }

    /// Subscribe to session events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    /// Current settings snapshot
    pub fn settings(&self) -> Settings {
        self.settings.snapshot()
    }

    /// Current recorder state (read-only)
    pub fn recorder_state(&self) -> RecorderState {
        self.recorder.state()
    }

    /// Start (or restart) the sampling loop
    pub fn start(&self) {
        self.restart_loop();
    }

    /// Cancel the sampling loop
    ///
    /// Leaves the frame source and media sink untouched; an active
    /// recording keeps running until stopped.
    pub fn shutdown(&self) {
        if let Some(handle) = self.loop_handle.lock().take() {
            handle.cancel();
        }
        tracing::info!("Session shut down");
    }

    /// Cancel the old loop and spawn a new one as a single step
    fn restart_loop(&self) {
        let mut guard = self.loop_handle.lock();
        if let Some(handle) = guard.take() {
            handle.cancel();
        }
        *guard = Some(pipeline::spawn(
            SamplerDeps {
                source: self.source.read().clone(),
                detector: self.detector.clone(),
                canvas: self.canvas.clone(),
                settings: self.settings.clone(),
                recorder: self.recorder.clone(),
            },
            self.generation.clone(),
        ));
    }

    fn notice(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!("Notice: {message}");
        let _ = self.event_tx.send(SessionEvent::Notice { message });
    }

    /// Flip the mirrored presentation; re-establishes the loop so repaints
    /// use the new coordinate frame immediately
    pub fn set_mirrored(&self, mirrored: bool) {
        self.settings.set_mirrored(mirrored);
        self.restart_loop();
    }

    /// Swap the frame source (e.g. camera reinitialization)
    pub fn set_frame_source(&self, source: Arc<dyn FrameSource>) {
        *self.source.write() = source;
        self.restart_loop();
    }

    /// Enable or disable detection-driven recording starts
    ///
    /// Disabling never stops an in-progress recording.
    pub fn set_auto_record(&self, enabled: bool) {
        self.settings.set_auto_record_enabled(enabled);
        self.notice(if enabled {
            "Enabled auto-record"
        } else {
            "Disabled auto-record"
        });
    }

    /// Set cue volume (clamped to [0, 1]) and play a confirmation cue
    pub fn set_volume(&self, volume: f32) {
        let v = self.settings.set_volume(volume);
        self.cue.emit(v);
    }

    /// Manually start a recording
    ///
    /// `announce` plays the feedback cue on entry. No-op while already
    /// recording.
    pub async fn start_recording(&self, announce: bool) -> CamResult<()> {
        if self.current_frame().is_none() {
            self.notice("Camera not available, cannot record");
            return Err(CamError::DeviceUnavailable("no frame source".into()));
        }
        self.recorder.start(StartOptions::manual(announce)).await
    }

    /// Manually stop the active recording. No-op while idle.
    pub async fn stop_recording(&self) -> CamResult<Option<Clip>> {
        self.recorder.stop().await
    }

    /// Record-button behavior: start when idle, stop when recording
    pub async fn toggle_recording(&self) -> CamResult<()> {
        match self.recorder.state() {
            RecorderState::Idle => self.start_recording(false).await,
            RecorderState::Recording => self.stop_recording().await.map(|_| ()),
        }
    }

    /// Capture the current frame as a PNG still
    pub async fn take_screenshot(&self) -> CamResult<String> {
        let Some(frame) = self.current_frame() else {
            self.notice("Camera not available, cannot take screenshot");
            return Err(CamError::DeviceUnavailable("no frame source".into()));
        };

        let png = encode_png(&frame)?;
        let filename = still_filename(Utc::now());
        self.save.save_still(&png, &filename)?;

        let _ = self.event_tx.send(SessionEvent::ScreenshotSaved {
            filename: filename.clone(),
        });
        tracing::info!("Screenshot saved as {filename}");
        Ok(filename)
    }

    fn current_frame(&self) -> Option<crate::source::Frame> {
        self.source
            .read()
            .current_frame()
            .filter(|frame| frame.is_ready())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::adapter::{DetectorError, ObjectDetector};
    use crate::detect::types::DetectionBatch;
    use crate::overlay::RasterOverlay;
    use crate::recorder::state::Clip;
    use crate::source::Frame;
    use async_trait::async_trait;
    use parking_lot::Mutex as PlMutex;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::Duration;
    use tokio::sync::mpsc;

    struct SwappableSource {
        frame: PlMutex<Option<Frame>>,
    }

    impl FrameSource for SwappableSource {
        fn current_frame(&self) -> Option<Frame> {
            self.frame.lock().clone()
        }
    }

    struct NullSink;

    #[async_trait]
    impl MediaSink for NullSink {
        async fn start(&self) -> CamResult<mpsc::Receiver<Vec<u8>>> {
            let (tx, rx) = mpsc::channel(1);
            let _ = tx.send(vec![42]).await;
            drop(tx);
            Ok(rx)
        }

        async fn stop(&self) -> CamResult<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemorySave {
        stills: PlMutex<Vec<String>>,
        clips: PlMutex<Vec<String>>,
    }

    impl SaveSink for MemorySave {
        fn save_clip(&self, _clip: &Clip, filename: &str) -> CamResult<()> {
            self.clips.lock().push(filename.to_string());
            Ok(())
        }

        fn save_still(&self, png: &[u8], filename: &str) -> CamResult<()> {
            assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);
            self.stills.lock().push(filename.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingCue {
        volumes: PlMutex<Vec<f32>>,
    }

    impl FeedbackCue for RecordingCue {
        fn emit(&self, volume: f32) {
            self.volumes.lock().push(volume);
        }
    }

    struct CountingDetector {
        calls: Arc<AtomicU64>,
    }

    #[async_trait]
    impl ObjectDetector for CountingDetector {
        async fn detect(&self, _frame: &Frame) -> Result<DetectionBatch, DetectorError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }
    }

    struct Fixture {
        session: CameraSession,
        save: Arc<MemorySave>,
        cue: Arc<RecordingCue>,
    }

    fn fixture(with_frame: bool) -> Fixture {
        let frame = with_frame.then(|| Frame::new(vec![0u8; 2 * 2 * 4].into(), 2, 2));
        let source = Arc::new(SwappableSource {
            frame: PlMutex::new(frame),
        });
        let save = Arc::new(MemorySave::default());
        let cue = Arc::new(RecordingCue::default());
        let session = CameraSession::new(SessionConfig {
            source,
            sink: Arc::new(NullSink),
            save: save.clone(),
            cue: cue.clone(),
            canvas: Box::new(RasterOverlay::new()),
            settings: Settings::default(),
        });
        Fixture { session, save, cue }
    }

    #[test]
    fn test_events_serialize_tagged_camel_case() {
        let event = SessionEvent::RecordingStopped {
            filename: "clip-20260829-130542.webm".into(),
            duration_ms: 1500,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "recordingStopped");
        assert_eq!(json["durationMs"], 1500);
    }

    #[tokio::test]
    async fn test_screenshot_without_camera_is_a_notice() {
        let f = fixture(false);
        let mut events = f.session.subscribe();

        let err = f.session.take_screenshot().await.unwrap_err();
        assert!(matches!(err, CamError::DeviceUnavailable(_)));
        assert!(matches!(
            events.recv().await.unwrap(),
            SessionEvent::Notice { .. }
        ));
        assert!(f.save.stills.lock().is_empty());
    }

    #[tokio::test]
    async fn test_screenshot_saves_png_still() {
        let f = fixture(true);
        let mut events = f.session.subscribe();

        let filename = f.session.take_screenshot().await.unwrap();
        assert!(filename.starts_with("shot-") && filename.ends_with(".png"));
        assert_eq!(*f.save.stills.lock(), vec![filename.clone()]);
        assert!(matches!(
            events.recv().await.unwrap(),
            SessionEvent::ScreenshotSaved { .. }
        ));
    }

    #[tokio::test]
    async fn test_set_volume_clamps_and_cues() {
        let f = fixture(true);
        f.session.set_volume(2.0);
        f.session.set_volume(0.0);

        assert_eq!(*f.cue.volumes.lock(), vec![1.0, 0.0]);
        assert_eq!(f.session.settings().volume, 0.0);
    }

    #[tokio::test]
    async fn test_record_without_camera_is_device_unavailable() {
        let f = fixture(false);
        let err = f.session.start_recording(false).await.unwrap_err();
        assert!(matches!(err, CamError::DeviceUnavailable(_)));
        assert_eq!(f.session.recorder_state(), RecorderState::Idle);
    }

    #[tokio::test]
    async fn test_toggle_starts_then_stops() {
        let f = fixture(true);

        f.session.toggle_recording().await.unwrap();
        assert_eq!(f.session.recorder_state(), RecorderState::Recording);

        f.session.toggle_recording().await.unwrap();
        assert_eq!(f.session.recorder_state(), RecorderState::Idle);
        assert_eq!(f.save.clips.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_disabling_auto_record_keeps_recording() {
        let f = fixture(true);

        f.session.set_auto_record(true);
        f.session.start_recording(false).await.unwrap();
        f.session.set_auto_record(false);

        assert_eq!(f.session.recorder_state(), RecorderState::Recording);
        assert!(!f.session.settings().auto_record_enabled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mirrored_change_reestablishes_single_loop() {
        let f = fixture(true);
        let calls = Arc::new(AtomicU64::new(0));
        f.session.detector_slot().install(Arc::new(CountingDetector {
            calls: calls.clone(),
        }));

        f.session.start();
        tokio::time::sleep(Duration::from_secs(1)).await;
        let before = calls.load(Ordering::SeqCst);
        assert!(before >= 9, "loop not ticking: {before}");

        f.session.set_mirrored(false);
        calls.store(0, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(1)).await;

        // Still one loop: the cadence did not double after re-establishment.
        let after = calls.load(Ordering::SeqCst);
        assert!((9..=12).contains(&after), "expected one loop's cadence, got {after}");

        f.session.shutdown();
        calls.store(0, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_frame_source_swap_reestablishes_loop() {
        let f = fixture(false);
        let calls = Arc::new(AtomicU64::new(0));
        f.session.detector_slot().install(Arc::new(CountingDetector {
            calls: calls.clone(),
        }));

        f.session.start();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        // New, ready source: ticks resume through the re-established loop.
        let ready = Arc::new(SwappableSource {
            frame: PlMutex::new(Some(Frame::new(vec![0u8; 2 * 2 * 4].into(), 2, 2))),
        });
        f.session.set_frame_source(ready);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(calls.load(Ordering::SeqCst) >= 9);

        f.session.shutdown();
    }
}
