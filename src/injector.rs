use crate::error::Failure;
use crate::logger::LogReport;

/// Cause attached to every simulated failure.
pub const SIMULATED_FAILURE_CAUSE: &str = "Simulated failure";

/// Turns a fully logged batch into a whole-batch failure.
///
/// There is no success path and no partial acknowledgment: every message in
/// the batch is left for the queueing system to redeliver or dead-letter.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailureInjector;

impl FailureInjector {
    #[must_use]
    pub fn inject(self, report: &LogReport) -> Failure {
        tracing::debug!(
            logged = report.logged,
            sink_errors = report.sink_errors.len(),
            "Injecting simulated failure for entire batch"
        );
        Failure::SimulatedFailure(SIMULATED_FAILURE_CAUSE.to_owned())
    }
}
