//! Tracing setup: console output plus OpenTelemetry spans in a local file.
//!
//! ```text
//! tracing macros ─┬─▶ fmt layer ──▶ stderr
//!                 └─▶ tracing-opentelemetry ──▶ SDK ──▶ FileSpanExporter ──▶ <data dir>/mpv-mirror-otlp.json
//! ```
//!
//! Engine log messages are re-emitted under the `mpv` target, so
//! `RUST_LOG=mpv=debug` or `trace-level = "warn,mpv=info"` select them
//! independently of the core's own events.
//!
//! # Modules
//!
//! - [`exporter`]: OTLP JSON span exporter and tracer provider
//! - [`rotating`]: size-based rotating line writer

pub mod exporter;
pub mod rotating;

pub use exporter::{create_tracer_provider, FileSpanExporter};
pub use rotating::RotatingWriter;

use crate::{Config, APP_NAME};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the span export inside the data directory.
pub const TRACE_FILE: &str = "mpv-mirror-otlp.json";

/// Installs the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` when set, then `config.trace_level`, then
/// `info`. When the data directory cannot be resolved or created the span
/// export is skipped and only console output is installed.
///
/// Only the first call in a process takes effect.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.trace_level.as_deref().unwrap_or("info"))
    });

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    let data_dir = crate::infrastructure::get_data_dir()
        .and_then(|dir| std::fs::create_dir_all(&dir).map(|()| dir).map_err(Into::into));
    let otel_layer = match data_dir {
        Ok(data_dir) => {
            let resource = Resource::new(vec![
                KeyValue::new("service.name", APP_NAME),
                KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
            ]);
            let provider = create_tracer_provider(data_dir.join(TRACE_FILE), resource);
            Some(OpenTelemetryLayer::new(provider.tracer(APP_NAME)))
        }
        Err(_) => None,
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init();
}
