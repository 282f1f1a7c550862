//! Frame source seam
//!
//! Platform-agnostic interface to the live video feed. The embedding app
//! owns the actual device (webcam, screen, test pattern); the engine only
//! borrows frames and never closes the source.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One sampled image from the live feed
///
/// Pixel data is RGBA8, row-major, `width * height * 4` bytes. Frames are
/// cheap to clone; the buffer is shared.
#[derive(Debug, Clone)]
pub struct Frame {
    data: Arc<[u8]>,
    width: u32,
    height: u32,
}

/// Pixel dimensions of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl Frame {
    pub fn new(data: Arc<[u8]>, width: u32, height: u32) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize * 4);
        Self {
            data,
            width,
            height,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> FrameSize {
        FrameSize {
            width: self.width,
            height: self.height,
        }
    }

    /// A frame with zero dimensions carries no image yet
    pub fn is_ready(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Read-only capability over the live video feed
///
/// `current_frame` returns `None` until the device has produced its first
/// image with valid dimensions. Implementations must be cheap to poll at
/// the sampling cadence.
pub trait FrameSource: Send + Sync {
    fn current_frame(&self) -> Option<Frame>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_readiness() {
        let empty = Frame::new(Vec::new().into(), 0, 0);
        assert!(!empty.is_ready());

        let frame = Frame::new(vec![0u8; 2 * 2 * 4].into(), 2, 2);
        assert!(frame.is_ready());
        assert_eq!(frame.size(), FrameSize { width: 2, height: 2 });
    }
}
