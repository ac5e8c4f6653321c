use crate::config::{ConsumerConfig, SinkKind};
use crate::consumer::FaultConsumer;
use crate::domain::InvocationContext;
use crate::error::Failure;
use crate::sink::{AttemptSink, JsonLinesSink, TracingSink};
use crate::telemetry::TelemetryGuard;
use lambda_runtime::{Context, Diagnostic, LambdaEvent};
use serde_json::Value;
use std::sync::Arc;

/// Builds the sink selected in config.
#[must_use]
pub fn build_sink(kind: SinkKind) -> Arc<dyn AttemptSink> {
    match kind {
        SinkKind::Tracing => Arc::new(TracingSink),
        SinkKind::JsonLines => Arc::new(JsonLinesSink::stdout()),
    }
}

#[must_use]
pub fn build_consumer(config: &ConsumerConfig) -> FaultConsumer {
    FaultConsumer::new(build_sink(config.sink), config)
}

/// Maps the Lambda runtime context onto the consumer's invocation context.
#[must_use]
pub fn invocation_context(ctx: &Context) -> InvocationContext {
    let mut invocation = InvocationContext::new(ctx.request_id.clone());
    if ctx.deadline > 0 {
        invocation = invocation.with_deadline_ms(ctx.deadline);
    }
    if !ctx.env_config.function_name.is_empty() {
        invocation = invocation.with_function_name(ctx.env_config.function_name.clone());
    }
    invocation
}

/// Reports the failure classification as the Lambda `errorType`.
impl From<Failure> for Diagnostic {
    fn from(failure: Failure) -> Self {
        Self { error_type: failure.kind().to_string(), error_message: failure.to_string() }
    }
}

/// Shared state behind every invocation of the Lambda service function.
#[derive(Debug)]
pub struct Host {
    consumer: FaultConsumer,
    telemetry: TelemetryGuard,
}

impl Host {
    #[must_use]
    pub const fn new(consumer: FaultConsumer, telemetry: TelemetryGuard) -> Self {
        Self { consumer, telemetry }
    }

    /// Runs the consumer for one Lambda event.
    ///
    /// # Errors
    /// Always returns the invocation's failure, which the runtime reports so
    /// that the queueing system leaves the batch unacknowledged.
    pub fn invoke(&self, event: LambdaEvent<Value>) -> Result<(), Failure> {
        let (payload, ctx) = event.into_parts();
        let invocation = invocation_context(&ctx);

        let result = self.consumer.handle(&payload, &invocation);
        self.telemetry.flush();

        match result {
            Ok(never) => match never {},
            Err(failure) => Err(failure),
        }
    }

    /// Shuts telemetry down once the runtime loop exits.
    pub fn shutdown(self) {
        self.telemetry.shutdown();
    }
}
