use crate::domain::AttemptEntry;
use crate::error::SinkError;
use crate::sink::AttemptSink;

/// Emits each entry as an `info` event on the active subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AttemptSink for TracingSink {
    fn record(&self, entry: &AttemptEntry) -> Result<(), SinkError> {
        tracing::info!(
            invocation_id = %entry.invocation_id,
            function_name = entry.function_name.as_deref(),
            message_id = %entry.message_id,
            position = entry.position,
            receive_count = entry.receive_count,
            redelivery = entry.redelivery,
            body_len = entry.body_len,
            body = %entry.body_excerpt,
            truncated = entry.truncated,
            "Received message"
        );
        Ok(())
    }
}
