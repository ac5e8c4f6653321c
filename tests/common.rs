use serde_json::{Value, json};
use sqs_fault_consumer::config::ConsumerConfig;
use sqs_fault_consumer::domain::AttemptEntry;
use sqs_fault_consumer::error::SinkError;
use sqs_fault_consumer::sink::AttemptSink;
use sqs_fault_consumer::{Failure, FaultConsumer};
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, Once};

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("sqs_fault_consumer=debug".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().init();
    });
}

/// Captures every entry it is given.
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<AttemptEntry>>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn entries(&self) -> Vec<AttemptEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn message_ids(&self) -> Vec<String> {
        self.entries().into_iter().map(|e| e.message_id).collect()
    }

    pub fn take(&self) -> Vec<AttemptEntry> {
        std::mem::take(&mut *self.entries.lock().unwrap())
    }
}

impl AttemptSink for RecordingSink {
    fn record(&self, entry: &AttemptEntry) -> Result<(), SinkError> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

/// Rejects every entry, as if the collector were unreachable.
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct UnavailableSink {
    pub attempts: Mutex<usize>,
}

impl AttemptSink for UnavailableSink {
    fn record(&self, _entry: &AttemptEntry) -> Result<(), SinkError> {
        *self.attempts.lock().unwrap() += 1;
        Err(std::io::Error::other("collector unreachable").into())
    }
}

/// Writer whose bytes stay readable after it is handed to a sink.
#[derive(Debug, Clone, Default)]
#[allow(dead_code)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

#[allow(dead_code)]
impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl std::io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[allow(dead_code)]
pub fn consumer_with(sink: Arc<dyn AttemptSink>) -> FaultConsumer {
    FaultConsumer::new(sink, &ConsumerConfig::default())
}

#[allow(dead_code)]
pub fn recording_consumer() -> (FaultConsumer, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    (consumer_with(Arc::clone(&sink) as Arc<dyn AttemptSink>), sink)
}

/// In-memory stand-in for a queue with a redrive policy.
///
/// A failed invocation leaves its batch visible again; a message received more
/// than `max_receive_count` times moves to the dead-letter list instead of
/// being delivered.
#[derive(Debug)]
#[allow(dead_code)]
pub struct RedriveQueue {
    max_receive_count: u32,
    visible: VecDeque<String>,
    bodies: BTreeMap<String, String>,
    receive_counts: BTreeMap<String, u32>,
    in_flight: Vec<String>,
    pub dead_letters: Vec<String>,
}

#[allow(dead_code)]
impl RedriveQueue {
    pub fn new(max_receive_count: u32) -> Self {
        Self {
            max_receive_count,
            visible: VecDeque::new(),
            bodies: BTreeMap::new(),
            receive_counts: BTreeMap::new(),
            in_flight: Vec::new(),
            dead_letters: Vec::new(),
        }
    }

    pub fn send(&mut self, message_id: &str, body: &str) {
        self.bodies.insert(message_id.to_owned(), body.to_owned());
        self.receive_counts.insert(message_id.to_owned(), 0);
        self.visible.push_back(message_id.to_owned());
    }

    /// Builds an SQS-shaped event from up to `batch_size` visible messages.
    pub fn receive(&mut self, batch_size: usize) -> Option<Value> {
        let mut records = Vec::new();
        while records.len() < batch_size {
            let Some(id) = self.visible.pop_front() else { break };
            let count = self.receive_counts.get_mut(&id).unwrap();
            if *count >= self.max_receive_count {
                self.dead_letters.push(id);
                continue;
            }
            *count += 1;
            records.push(json!({
                "messageId": id,
                "receiptHandle": format!("{id}-receipt-{count}"),
                "body": self.bodies[&id],
                "attributes": { "ApproximateReceiveCount": count.to_string() },
                "eventSource": "aws:sqs",
                "eventSourceARN": "arn:aws:sqs:us-east-1:000000000000:fault-queue"
            }));
            self.in_flight.push(id);
        }

        if records.is_empty() { None } else { Some(json!({ "Records": records })) }
    }

    /// Applies an invocation outcome to the in-flight batch.
    pub fn settle(&mut self, outcome: Result<(), &Failure>) {
        let batch = std::mem::take(&mut self.in_flight);
        match outcome {
            Ok(()) => {
                for id in batch {
                    self.bodies.remove(&id);
                }
            }
            Err(_) => self.visible.extend(batch),
        }
    }

    pub fn is_drained(&self) -> bool {
        self.visible.is_empty() && self.in_flight.is_empty()
    }

    pub fn receive_count(&self, message_id: &str) -> u32 {
        self.receive_counts.get(message_id).copied().unwrap_or_default()
    }
}
