//! Annotation overlay module
//!
//! Paints detection results onto a canvas sized to the live frame:
//! - `renderer` holds the drawing policy (colors, labels, mirroring)
//! - `raster` is a headless RGBA canvas implementation

pub mod raster;
pub mod renderer;

pub use raster::RasterOverlay;
pub use renderer::{render, Color, OverlayCanvas, NEUTRAL_COLOR, WARNING_COLOR};
