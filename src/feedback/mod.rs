//! Audible feedback module
//!
//! A short volume-scaled cue played on state transitions (recording start,
//! volume changes). Emission is fire-and-forget: it never blocks the caller
//! and failures are logged, not surfaced.

pub mod beep;

pub use beep::CpalBeeper;

/// Plays a short audible cue
pub trait FeedbackCue: Send + Sync {
    /// Play the cue at `volume` in [0, 1]; 0 produces no output.
    /// Must return immediately.
    fn emit(&self, volume: f32);
}

/// Cue that discards all emissions; useful for headless deployments
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCue;

impl FeedbackCue for SilentCue {
    fn emit(&self, _volume: f32) {}
}
