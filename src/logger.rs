use crate::domain::{AttemptEntry, InvocationContext, MessageRecord};
use crate::error::SinkError;
use crate::sink::AttemptSink;
use std::sync::Arc;

/// Outcome of logging one batch.
#[derive(Debug, Default)]
pub struct LogReport {
    /// Entries the sink accepted.
    pub logged: usize,
    /// Positions and errors of entries the sink rejected.
    pub sink_errors: Vec<(usize, SinkError)>,
}

impl LogReport {
    #[must_use]
    pub const fn attempted(&self) -> usize {
        self.logged + self.sink_errors.len()
    }
}

/// Writes one attempt entry per record, best effort.
#[derive(Debug, Clone)]
pub struct AttemptLogger {
    sink: Arc<dyn AttemptSink>,
    excerpt_limit: usize,
}

impl AttemptLogger {
    #[must_use]
    pub fn new(sink: Arc<dyn AttemptSink>, excerpt_limit: usize) -> Self {
        Self { sink, excerpt_limit }
    }

    /// Logs every record in delivery order.
    ///
    /// A sink error never stops the batch; it is reported as a diagnostic and
    /// the next record is written.
    pub fn log_batch(&self, ctx: &InvocationContext, records: &[MessageRecord]) -> LogReport {
        let mut report = LogReport::default();

        for (position, record) in records.iter().enumerate() {
            let entry = AttemptEntry::new(ctx, position, record, self.excerpt_limit);
            match self.sink.record(&entry) {
                Ok(()) => report.logged += 1,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        message_id = %record.message_id,
                        position,
                        "Failed to record delivery attempt"
                    );
                    report.sink_errors.push((position, e));
                }
            }
        }

        report
    }
}
