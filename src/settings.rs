//! User-facing settings
//!
//! Process-wide knobs owned by the embedding UI. The core reads a fresh
//! snapshot each cycle and never mutates them itself.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Current user settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Whether the video presentation is horizontally mirrored
    pub mirrored: bool,

    /// Whether a detected person may start a recording automatically
    pub auto_record_enabled: bool,

    /// Feedback cue volume in [0, 1]
    pub volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mirrored: true,
            auto_record_enabled: false,
            volume: 0.8,
        }
    }
}

/// Shared handle to the settings surface
///
/// The UI writes through this handle; core components take read snapshots.
#[derive(Clone, Default)]
pub struct SettingsHandle {
    inner: Arc<RwLock<Settings>>,
}

impl SettingsHandle {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Settings {
        *self.inner.read()
    }

    pub fn set_mirrored(&self, mirrored: bool) {
        self.inner.write().mirrored = mirrored;
    }

    pub fn set_auto_record_enabled(&self, enabled: bool) {
        self.inner.write().auto_record_enabled = enabled;
    }

    /// Set the cue volume, clamped to [0, 1]
    pub fn set_volume(&self, volume: f32) -> f32 {
        let clamped = volume.clamp(0.0, 1.0);
        self.inner.write().volume = clamped;
        clamped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert!(s.mirrored);
        assert!(!s.auto_record_enabled);
        assert!((s.volume - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn test_volume_clamped() {
        let handle = SettingsHandle::default();
        assert_eq!(handle.set_volume(1.7), 1.0);
        assert_eq!(handle.set_volume(-0.2), 0.0);
        assert_eq!(handle.snapshot().volume, 0.0);
    }
}
