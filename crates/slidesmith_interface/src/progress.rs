//! Progress reporting seam between the orchestrator and its caller.

use slidesmith_core::ProgressEvent;

/// Receives progress events from a pipeline run.
///
/// Implementations must not panic; the orchestrator guards each dispatch and
/// logs any panic rather than aborting generation, but a well-behaved sink
/// never relies on that.
pub trait ProgressSink: Send + Sync {
    /// Handle one progress event.
    fn report(&self, event: &ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(&ProgressEvent) + Send + Sync,
{
    fn report(&self, event: &ProgressEvent) {
        self(event)
    }
}
