//! Object detection module
//!
//! Defines the detection data model and the adapter seam to an external
//! detection backend (e.g. an ML model running elsewhere).

pub mod adapter;
pub mod types;

pub use adapter::{DetectorError, DetectorSlot, ObjectDetector};
pub use types::{BoundingBox, Detection, DetectionBatch, PERSON_LABEL};
