//! Detection data model
//!
//! Detections are created fresh each cycle and discarded after rendering
//! and trigger evaluation; no history is retained.

use serde::{Deserialize, Serialize};

/// The distinguished class that drives auto-recording and warning color
pub const PERSON_LABEL: &str = "person";

/// Axis-aligned box in frame-pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A single labeled, scored, localized object found in a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    /// Class label as reported by the backend
    pub label: String,

    /// Confidence in [0, 1]
    pub score: f32,

    /// Location in frame-pixel coordinates
    pub bounds: BoundingBox,
}

impl Detection {
    pub fn new(label: impl Into<String>, score: f32, bounds: BoundingBox) -> Self {
        Self {
            label: label.into(),
            score,
            bounds,
        }
    }

    pub fn is_person(&self) -> bool {
        self.label == PERSON_LABEL
    }
}

/// All detections for one frame; order is backend-defined and carries no
/// meaning downstream.
pub type DetectionBatch = Vec<Detection>;

/// Whether any detection in the batch is the distinguished person class
pub fn contains_person(batch: &[Detection]) -> bool {
    batch.iter().any(Detection::is_person)
}
