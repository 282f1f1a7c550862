//! Detection pipeline module
//!
//! The sampling loop is the engine's heartbeat: every other component
//! reacts to its tick or to discrete user actions.

pub mod sampler;

pub use sampler::{spawn, LoopHandle, SamplerDeps, SharedCanvas, TICK_INTERVAL};
