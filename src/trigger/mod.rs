//! Auto-trigger decision
//!
//! Decides per detection batch whether to request an automatic recording
//! start. Presence-only, single-class policy: any `"person"` detection
//! while auto-record is enabled triggers; score and count do not matter.
//! Idempotence across consecutive person ticks comes from the recorder's
//! start guard, not from state held here.

use crate::detect::types::{contains_person, Detection};
use crate::settings::Settings;

/// Whether this batch should start a recording automatically
///
/// Toggling auto-record off never stops an in-progress recording; it only
/// makes this return false for future batches.
pub fn should_trigger(batch: &[Detection], settings: &Settings) -> bool {
    settings.auto_record_enabled && contains_person(batch)
}
