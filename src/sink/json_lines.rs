use crate::domain::AttemptEntry;
use crate::error::SinkError;
use crate::sink::AttemptSink;
use std::io::{self, Write};
use std::sync::Mutex;

/// Writes one JSON object per line.
///
/// The writer sits behind a mutex so a line is never interleaved with one
/// from a concurrent invocation.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: Mutex<W>,
}

impl<W: Write> JsonLinesSink<W> {
    pub const fn new(writer: W) -> Self {
        Self { writer: Mutex::new(writer) }
    }
}

impl JsonLinesSink<io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + std::fmt::Debug> AttemptSink for JsonLinesSink<W> {
    fn record(&self, entry: &AttemptEntry) -> Result<(), SinkError> {
        let mut line = serde_json::to_vec(entry).map_err(io::Error::from)?;
        line.push(b'\n');

        let mut writer = self.writer.lock().map_err(|_| io::Error::other("sink writer lock poisoned"))?;
        writer.write_all(&line)?;
        writer.flush()?;
        Ok(())
    }
}
