pub mod json_lines;
pub mod tracing_sink;

pub use json_lines::JsonLinesSink;
pub use tracing_sink::TracingSink;

use crate::domain::AttemptEntry;
use crate::error::SinkError;

/// Destination for attempt entries.
///
/// Implementations are shared by concurrent invocations and must accept
/// writes from several threads at once.
pub trait AttemptSink: Send + Sync + std::fmt::Debug {
    /// Writes one attempt entry.
    ///
    /// # Errors
    /// Returns `SinkError::Unavailable` if the entry could not be written.
    fn record(&self, entry: &AttemptEntry) -> Result<(), SinkError>;
}

/// Discards every entry.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl AttemptSink for NoopSink {
    fn record(&self, _entry: &AttemptEntry) -> Result<(), SinkError> {
        Ok(())
    }
}
