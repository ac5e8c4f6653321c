#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

use lambda_runtime::{LambdaEvent, service_fn};
use serde_json::Value;
use sqs_fault_consumer::config::Config;
use sqs_fault_consumer::host::{self, Host};
use sqs_fault_consumer::telemetry;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    let config = Config::load();
    let telemetry_guard = telemetry::init_telemetry(&config.telemetry)?;

    tracing::info!(
        sink = ?config.consumer.sink,
        body_excerpt_bytes = config.consumer.body_excerpt_bytes,
        "Starting fault-injection consumer"
    );

    let host = Arc::new(Host::new(host::build_consumer(&config.consumer), telemetry_guard));

    let handler = {
        let host = Arc::clone(&host);
        service_fn(move |event: LambdaEvent<Value>| {
            let host = Arc::clone(&host);
            async move { host.invoke(event) }
        })
    };

    let result = lambda_runtime::run(handler).await;

    if let Ok(host) = Arc::try_unwrap(host) {
        host.shutdown();
    } else {
        tracing::warn!("Runtime still holds the host; skipping telemetry shutdown");
    }

    result
}
