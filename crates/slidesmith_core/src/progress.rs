//! Progress events emitted by the orchestrator.

use crate::Stage;
use serde::{Deserialize, Serialize};

/// A single progress report for one pipeline run.
///
/// `current` never exceeds `total`, and events within a run are emitted in
/// strictly increasing stage order. `total` starts as an estimate and is
/// recalculated once the composition plan reveals the true unit count, so
/// consumers must tolerate `total` changing between events of the same run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ProgressEvent {
    /// The stage the pipeline has just entered or advanced within
    stage: Stage,
    /// Completed steps so far, including this one
    current: usize,
    /// Known or estimated total steps for the run
    total: usize,
}

impl ProgressEvent {
    /// Create a progress event, clamping `current` to `total`.
    pub fn new(stage: Stage, current: usize, total: usize) -> Self {
        let total = total.max(1);
        Self {
            stage,
            current: current.min(total),
            total,
        }
    }
}
