use crate::config::ConsumerConfig;
use crate::decoder;
use crate::domain::InvocationContext;
use crate::error::{Failure, SinkError};
use crate::injector::FailureInjector;
use crate::logger::AttemptLogger;
use crate::sink::AttemptSink;
use opentelemetry::{KeyValue, global, metrics::Counter};
use serde_json::Value;
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

#[derive(Clone, Debug)]
struct Metrics {
    records_observed: Counter<u64>,
    failures: Counter<u64>,
    sink_errors: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("sqs-fault-consumer");
        Self {
            records_observed: meter
                .u64_counter("consumer_records_observed_total")
                .with_description("Total message records logged before failing the batch")
                .build(),
            failures: meter
                .u64_counter("consumer_invocation_failures_total")
                .with_description("Total invocations failed, by classification")
                .build(),
            sink_errors: meter
                .u64_counter("consumer_sink_errors_total")
                .with_description("Total attempt entries the observability sink rejected")
                .build(),
        }
    }
}

/// Steps of a single invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Received,
    Decoding,
    Logging,
    Failing,
    /// Every invocation ends here; there is no succeeded state.
    Terminated,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Received => "received",
            Self::Decoding => "decoding",
            Self::Logging => "logging",
            Self::Failing => "failing",
            Self::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// Everything one invocation did, ending in its failure.
#[derive(Debug)]
pub struct InvocationReport {
    pub phases: Vec<Phase>,
    pub logged: usize,
    pub sink_errors: Vec<(usize, SinkError)>,
    pub failure: Failure,
}

impl InvocationReport {
    #[must_use]
    pub fn final_phase(&self) -> Phase {
        self.phases.last().copied().unwrap_or(Phase::Received)
    }
}

/// Decodes a batch, logs every record, then fails the whole batch.
///
/// Holds no per-invocation state, so a single instance can serve concurrent
/// invocations.
#[derive(Debug, Clone)]
pub struct FaultConsumer {
    logger: AttemptLogger,
    injector: FailureInjector,
    metrics: Metrics,
}

impl FaultConsumer {
    #[must_use]
    pub fn new(sink: Arc<dyn AttemptSink>, config: &ConsumerConfig) -> Self {
        Self {
            logger: AttemptLogger::new(sink, config.body_excerpt_bytes),
            injector: FailureInjector,
            metrics: Metrics::new(),
        }
    }

    /// Runs one invocation and reports how it failed.
    #[tracing::instrument(
        skip(self, payload, ctx),
        fields(
            invocation_id = %ctx.invocation_id,
            records = tracing::field::Empty,
            remaining_ms = tracing::field::Empty
        )
    )]
    pub fn run(&self, payload: &Value, ctx: &InvocationContext) -> InvocationReport {
        if let Some(remaining) = ctx.remaining_at(SystemTime::now()) {
            let remaining_ms = u64::try_from(remaining.as_millis()).unwrap_or(u64::MAX);
            tracing::Span::current().record("remaining_ms", remaining_ms);
        }

        let mut phases = vec![Phase::Received];
        let mut enter = |phase: Phase| {
            tracing::debug!(phase = %phase, "Invocation phase");
            phases.push(phase);
        };

        enter(Phase::Decoding);
        let records = match decoder::decode(payload) {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(error = %e, "Rejecting malformed payload");
                enter(Phase::Terminated);
                return self.finish(phases, 0, Vec::new(), e.into());
            }
        };
        tracing::Span::current().record("records", records.len());

        enter(Phase::Logging);
        let report = self.logger.log_batch(ctx, &records);

        enter(Phase::Failing);
        let failure = self.injector.inject(&report);
        enter(Phase::Terminated);

        tracing::info!(
            attempted = report.attempted(),
            logged = report.logged,
            sink_errors = report.sink_errors.len(),
            "Failing batch of {} message(s)",
            records.len()
        );
        self.finish(phases, report.logged, report.sink_errors, failure)
    }

    /// Host-facing entry point. There is no success value to return.
    ///
    /// # Errors
    /// Always returns the invocation's [`Failure`].
    pub fn handle(&self, payload: &Value, ctx: &InvocationContext) -> Result<Infallible, Failure> {
        Err(self.run(payload, ctx).failure)
    }

    fn finish(
        &self,
        phases: Vec<Phase>,
        logged: usize,
        sink_errors: Vec<(usize, SinkError)>,
        failure: Failure,
    ) -> InvocationReport {
        self.metrics.records_observed.add(logged as u64, &[]);
        if !sink_errors.is_empty() {
            self.metrics.sink_errors.add(sink_errors.len() as u64, &[]);
        }
        self.metrics.failures.add(1, &[KeyValue::new("classification", failure.kind().as_str())]);

        InvocationReport { phases, logged, sink_errors, failure }
    }
}
