//! Logging for the `gaucho` CLI.
//!
//! Human-readable logs always go to stderr: stdout carries the command's
//! result (an opener, a prompt, or `--json` output) and must stay parseable.
//! `--otel` adds OpenTelemetry span export, which does print to stdout, so
//! it is a local debugging aid and should not be combined with `--json`
//! when the output is piped into another tool.
//!
//! ```no_run
//! gaucho_observe::tracing_setup::init_tracing("warn", false).unwrap();
//! // ... run the command ...
//! gaucho_observe::tracing_setup::shutdown_tracing();
//! ```

use std::sync::OnceLock;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Tracer provider kept for flushing at exit; unset unless `--otel` was given.
static OTEL_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();

/// Name reported as the instrumentation scope of exported spans.
const TRACER_NAME: &str = "gaucho";

/// Install the global subscriber.
///
/// `default_filter` is what the CLI derived from `-v`/`--quiet`; a `RUST_LOG`
/// in the environment takes precedence over it. Span close events are logged
/// so a slow backend call shows up with its duration under `-v`.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(
    default_filter: &str,
    enable_otel: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer);

    if !enable_otel {
        registry.try_init()?;
        return Ok(());
    }

    // Simple (unbatched) export: a CLI run is short and exits right after.
    let provider = SdkTracerProvider::builder()
        .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
        .build();
    let otel_layer = tracing_opentelemetry::layer().with_tracer(provider.tracer(TRACER_NAME));
    registry.with(otel_layer).try_init()?;

    let _ = OTEL_PROVIDER.set(provider.clone());
    opentelemetry::global::set_tracer_provider(provider);
    Ok(())
}

/// Flush exported spans before the process exits. No-op without `--otel`.
pub fn shutdown_tracing() {
    if let Some(provider) = OTEL_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            eprintln!("warning: failed to flush OpenTelemetry spans: {e}");
        }
    }
}
