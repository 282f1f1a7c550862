//! Capture recorder
//!
//! State machine around the media sink: manual start/stop, a 30-second
//! auto-stop ceiling, and assembly of incremental sink chunks into one
//! deliverable clip. Transitions from the timer path and the user path are
//! serialized behind one lock; re-entrant requests are silent no-ops.

use crate::feedback::FeedbackCue;
use crate::recorder::state::{Clip, RecorderState, RecordingSession, StartOptions};
use crate::save::{clip_filename, SaveSink};
use crate::session::SessionEvent;
use crate::settings::SettingsHandle;
use crate::utils::error::{CamError, CamResult};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Ceiling after which an active recording is force-stopped
pub const MAX_CLIP_DURATION: Duration = Duration::from_secs(30);

/// Capability to capture the live stream into incremental binary chunks
///
/// `start` hands back the chunk channel; the sink closes it after `stop`
/// once all buffered data has been flushed. The sink is owned by session
/// setup/teardown; the recorder only drives start/stop.
#[async_trait]
pub trait MediaSink: Send + Sync {
    async fn start(&self) -> CamResult<mpsc::Receiver<Vec<u8>>>;
    async fn stop(&self) -> CamResult<()>;
}

/// Why a stop was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopReason {
    Manual,
    Deadline,
}

/// Bookkeeping for the one in-flight recording
struct ActiveRecording {
    session: RecordingSession,
    started: Instant,
    /// Drains sink chunks; resolves to the assembled clip bytes
    collector: JoinHandle<Vec<u8>>,
    /// Fires the auto-stop at the clip ceiling
    deadline: JoinHandle<()>,
}

struct RecorderInner {
    state: RwLock<RecorderState>,
    /// Serializes all transitions; holds the session while Recording
    active: Mutex<Option<ActiveRecording>>,
    sink: Arc<dyn MediaSink>,
    save: Arc<dyn SaveSink>,
    cue: Arc<dyn FeedbackCue>,
    settings: SettingsHandle,
    event_tx: broadcast::Sender<SessionEvent>,
}

/// Recording state machine
///
/// Cheap to clone; clones share one state machine.
#[derive(Clone)]
pub struct CaptureRecorder {
    inner: Arc<RecorderInner>,
}

impl CaptureRecorder {
    pub fn new(
        sink: Arc<dyn MediaSink>,
        save: Arc<dyn SaveSink>,
        cue: Arc<dyn FeedbackCue>,
        settings: SettingsHandle,
        event_tx: broadcast::Sender<SessionEvent>,
    ) -> Self {
        Self {
            inner: Arc::new(RecorderInner {
                state: RwLock::new(RecorderState::Idle),
                active: Mutex::new(None),
                sink,
                save,
                cue,
                settings,
                event_tx,
            }),
        }
    }

    /// Current recorder state (read-only observation)
    pub fn state(&self) -> RecorderState {
        *self.inner.state.read()
    }

    /// Start a recording
    ///
    /// No-op while already recording: repeated requests while a session is
    /// live (e.g. person detections on consecutive ticks) have no effect.
    pub async fn start(&self, opts: StartOptions) -> CamResult<()> {
        let mut active = self.inner.active.lock().await;
        if active.is_some() {
            tracing::debug!("Start ignored: already recording");
            return Ok(());
        }

        let mut rx = self.inner.sink.start().await?;

        let collector = tokio::spawn(async move {
            let mut buffer = Vec::new();
            while let Some(chunk) = rx.recv().await {
                buffer.extend_from_slice(&chunk);
            }
            buffer
        });

        let recorder = self.clone();
        let deadline = tokio::spawn(async move {
            tokio::time::sleep(MAX_CLIP_DURATION).await;
            if let Err(e) = recorder.stop_with(StopReason::Deadline).await {
                tracing::warn!("Auto-stop failed: {e}");
            }
        });

        let session = RecordingSession::new(opts.trigger);
        tracing::info!(
            "Recording started (session {}, auto_triggered: {})",
            session.id,
            session.auto_triggered
        );

        if opts.announce {
            self.inner.cue.emit(self.inner.settings.snapshot().volume);
        }

        let _ = self.inner.event_tx.send(SessionEvent::RecordingStarted {
            auto_triggered: session.auto_triggered,
        });

        *self.inner.state.write() = RecorderState::Recording;
        *active = Some(ActiveRecording {
            session,
            started: Instant::now(),
            collector,
            deadline,
        });

        Ok(())
    }

    /// Stop the active recording and deliver the assembled clip
    ///
    /// No-op while idle. Cancels the pending auto-stop so a manual stop is
    /// never followed by a duplicate deadline stop.
    pub async fn stop(&self) -> CamResult<Option<Clip>> {
        self.stop_with(StopReason::Manual).await
    }

    async fn stop_with(&self, reason: StopReason) -> CamResult<Option<Clip>> {
        let mut active = self.inner.active.lock().await;
        let Some(recording) = active.take() else {
            tracing::debug!("Stop ignored: not recording");
            return Ok(None);
        };

        // The deadline task must not abort itself mid-stop; its sleep has
        // already completed when it reaches here.
        if reason == StopReason::Manual {
            recording.deadline.abort();
        }

        // The session is destroyed here; observers see Idle even if the
        // flush below fails. New starts still queue on the transition lock.
        *self.inner.state.write() = RecorderState::Idle;

        tracing::info!("Stopping recording ({reason:?})");

        self.inner.sink.stop().await?;
        let data = recording
            .collector
            .await
            .map_err(|e| CamError::Sink(format!("chunk collector failed: {e}")))?;

        let duration_ms = recording.started.elapsed().as_millis() as u64;
        let clip = Clip {
            data,
            started_at: recording.session.started_at,
            duration_ms,
            auto_triggered: recording.session.auto_triggered,
        };

        let filename = clip_filename(clip.started_at);
        self.inner.save.save_clip(&clip, &filename)?;

        let _ = self.inner.event_tx.send(SessionEvent::RecordingStopped {
            filename,
            duration_ms,
        });

        tracing::info!(
            "Recording stopped: {} bytes over {}ms",
            clip.data.len(),
            duration_ms
        );
        Ok(Some(clip))
    }
}
