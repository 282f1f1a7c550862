//! Annotation renderer
//!
//! Draws one rectangle and one label per detection onto an overlay canvas.
//! The canvas is resized to the source frame on every call since the feed
//! can be reinitialized at a different resolution at any time.

use crate::detect::types::{Detection, PERSON_LABEL};
use crate::source::FrameSize;
use serde::{Deserialize, Serialize};

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Box/label color for the distinguished person class
pub const WARNING_COLOR: Color = Color {
    r: 0xFF,
    g: 0x0F,
    b: 0x0F,
    a: 0xFF,
};

/// Box/label color for every other class
pub const NEUTRAL_COLOR: Color = Color {
    r: 0x00,
    g: 0xB6,
    b: 0x12,
    a: 0xFF,
};

/// Drawing surface the renderer paints on
///
/// Implemented by the headless raster canvas and by whatever surface an
/// embedding UI wires in. All calls are synchronous and must not block.
pub trait OverlayCanvas: Send {
    /// Resize the surface to exactly these pixel dimensions
    fn resize(&mut self, size: FrameSize);

    /// Erase previous contents
    fn clear(&mut self);

    /// Outline a detection box
    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    /// Paint a label tag anchored at the box origin
    fn fill_label(&mut self, text: &str, x: f32, y: f32, color: Color);
}

/// Color for one detection: warning iff it is the person class
pub fn color_for(detection: &Detection) -> Color {
    if detection.label == PERSON_LABEL {
        WARNING_COLOR
    } else {
        NEUTRAL_COLOR
    }
}

/// Label text with confidence as a percentage
pub fn label_text(detection: &Detection) -> String {
    format!("{} {:.0}%", detection.label, detection.score * 100.0)
}

/// Paint a detection batch onto the canvas
///
/// Resizes to `size`, clears, then draws one rect + one label per
/// detection. When `mirrored`, the horizontal coordinate frame is flipped
/// so annotations line up with a mirrored video presentation.
pub fn render(canvas: &mut dyn OverlayCanvas, size: FrameSize, batch: &[Detection], mirrored: bool) {
    canvas.resize(size);
    canvas.clear();

    for detection in batch {
        let b = detection.bounds;
        let x = if mirrored {
            size.width as f32 - b.x - b.width
        } else {
            b.x
        };
        let color = color_for(detection);

        canvas.stroke_rect(x, b.y, b.width, b.height, color);
        canvas.fill_label(&label_text(detection), x, b.y, color);
    }
}
