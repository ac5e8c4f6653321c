use clap::{Args, Parser, ValueEnum};

#[derive(Clone, Debug, Default, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub consumer: ConsumerConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SinkKind {
    /// Attempt entries become tracing events
    #[default]
    Tracing,
    /// Attempt entries are written to stdout as JSON lines
    JsonLines,
}

#[derive(Clone, Debug, Args)]
pub struct ConsumerConfig {
    /// Maximum number of body bytes copied into each attempt entry
    #[arg(long, env = "FAULT_CONSUMER_BODY_EXCERPT_BYTES", default_value_t = 1024)]
    pub body_excerpt_bytes: usize,

    /// Where attempt entries are written
    #[arg(long, env = "FAULT_CONSUMER_SINK", value_enum, default_value_t = SinkKind::Tracing)]
    pub sink: SinkKind,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self { body_excerpt_bytes: 1024, sink: SinkKind::Tracing }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    #[default]
    Json,
}

#[derive(Clone, Debug, Default, Args)]
pub struct TelemetryConfig {
    /// Log output format
    #[arg(long, env = "FAULT_CONSUMER_LOG_FORMAT", value_enum, default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,

    /// OTLP collector base URL; export is disabled when unset
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }
}
