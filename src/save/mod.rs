//! Artifact save collaborator
//!
//! The engine hands finished artifacts (a recorded clip, a still) to a
//! `SaveSink` with a timestamp-derived filename and never manages storage
//! beyond that. `DiskSink` is the bundled directory-backed implementation.

use crate::recorder::state::Clip;
use crate::source::Frame;
use crate::utils::error::{CamError, CamResult};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::PathBuf;

/// Persists finished artifacts
pub trait SaveSink: Send + Sync {
    /// Persist a finished clip under the given filename
    fn save_clip(&self, clip: &Clip, filename: &str) -> CamResult<()>;

    /// Persist an encoded still image under the given filename
    fn save_still(&self, png: &[u8], filename: &str) -> CamResult<()>;
}

/// Filename for a clip recorded at `started_at`
pub fn clip_filename(started_at: DateTime<Utc>) -> String {
    format!("clip-{}.webm", started_at.format("%Y%m%d-%H%M%S"))
}

/// Filename for a still captured at `taken_at`
pub fn still_filename(taken_at: DateTime<Utc>) -> String {
    format!("shot-{}.png", taken_at.format("%Y%m%d-%H%M%S"))
}

/// PNG-encode a frame for still capture
pub fn encode_png(frame: &Frame) -> CamResult<Vec<u8>> {
    let mut out = Vec::new();
    let mut encoder = png::Encoder::new(&mut out, frame.width(), frame.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| CamError::Encode(e.to_string()))?;
    writer
        .write_image_data(frame.data())
        .map_err(|e| CamError::Encode(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| CamError::Encode(e.to_string()))?;

    Ok(out)
}

/// Save sink writing artifacts into a directory
pub struct DiskSink {
    dir: PathBuf,
}

impl DiskSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SaveSink for DiskSink {
    fn save_clip(&self, clip: &Clip, filename: &str) -> CamResult<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);
        fs::write(&path, &clip.data)?;
        tracing::info!(
            "Saved clip to {:?} ({} bytes, {}ms)",
            path,
            clip.data.len(),
            clip.duration_ms
        );
        Ok(())
    }

    fn save_still(&self, png: &[u8], filename: &str) -> CamResult<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);
        fs::write(&path, png)?;
        tracing::info!("Saved still to {:?} ({} bytes)", path, png.len());
        Ok(())
    }
}
