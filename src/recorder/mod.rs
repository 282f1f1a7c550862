//! Recording system module
//!
//! Implements the capture state machine:
//! - MediaSink trait for the incremental chunk source
//! - CaptureRecorder for start/stop transitions and the auto-stop ceiling
//! - state types for sessions and finished clips

pub mod capture;
pub mod state;

pub use capture::{CaptureRecorder, MediaSink, MAX_CLIP_DURATION};
pub use state::{Clip, RecorderState, RecordingSession, StartOptions, StartTrigger};
