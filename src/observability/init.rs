//! Subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "reelshelf";

/// Installs the global tracing subscriber.
///
/// Only the first call in a process takes effect. If the data directory
/// cannot be created the span file is skipped and only stderr logging is
/// installed.
///
/// # Example
///
/// ```no_run
/// use reelshelf::observability::init_tracing;
/// use reelshelf::Config;
///
/// let config = Config {
///     trace_level: Some("reelshelf=debug".to_string()),
///     ..Config::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.trace_level.as_deref().unwrap_or("info"))
    });

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let otel_layer = match std::fs::create_dir_all(&config.data_dir) {
        Ok(()) => {
            let resource = Resource::new(vec![opentelemetry::KeyValue::new(
                "service.name",
                SERVICE_NAME,
            )]);
            let provider = tracer::create_tracer_provider(config.trace_file(), resource);
            Some(OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME)))
        }
        Err(_) => None,
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init();
}
