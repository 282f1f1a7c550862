//! Recording state management
//!
//! Defines the recording state machine's data: the state enum, the
//! per-recording session, and the finished clip handed downstream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current state of the capture recorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecorderState {
    /// No recording in progress
    #[default]
    Idle,
    /// Currently recording
    Recording,
}

/// What asked for a recording to start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartTrigger {
    /// Explicit user action
    Manual,
    /// Detection-driven auto start
    Auto,
}

/// Options for a start request
#[derive(Debug, Clone, Copy)]
pub struct StartOptions {
    pub trigger: StartTrigger,
    /// Whether to play the feedback cue on entry
    pub announce: bool,
}

impl StartOptions {
    /// Manual start; cue only if the caller asks for it
    pub fn manual(announce: bool) -> Self {
        Self {
            trigger: StartTrigger::Manual,
            announce,
        }
    }

    /// Auto-triggered start; always announced
    pub fn auto() -> Self {
        Self {
            trigger: StartTrigger::Auto,
            announce: true,
        }
    }
}

/// Live recording bookkeeping
///
/// Exists only while the recorder is `Recording`; destroyed on the
/// transition back to `Idle`. At most one session exists at any time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingSession {
    /// Session identity
    pub id: Uuid,

    /// Wall-clock start time
    pub started_at: DateTime<Utc>,

    /// Whether detection started this session
    pub auto_triggered: bool,
}

impl RecordingSession {
    pub fn new(trigger: StartTrigger) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            auto_triggered: trigger == StartTrigger::Auto,
        }
    }
}

/// A finished recording, assembled from all sink increments at stop time
#[derive(Debug, Clone)]
pub struct Clip {
    /// Container bytes as delivered by the media sink
    pub data: Vec<u8>,

    /// Wall-clock start of the recording
    pub started_at: DateTime<Utc>,

    /// Recorded duration in milliseconds
    pub duration_ms: u64,

    /// Whether the recording was auto-triggered
    pub auto_triggered: bool,
}
