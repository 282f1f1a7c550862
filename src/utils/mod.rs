//! Shared utilities

pub mod error;

pub use error::{CamError, CamResult};
