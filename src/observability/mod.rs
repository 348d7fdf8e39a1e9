//! Tracing setup with file-based span export.
//!
//! Log events go to stderr through a `fmt` layer. Spans are also handed to
//! OpenTelemetry and written to a JSON-lines file in the data directory:
//!
//! ```text
//! tracing ─┬─ fmt layer ──────────────────────────→ stderr
//!          └─ tracing-opentelemetry → SDK → FileSpanExporter → reelshelf-otlp.json
//! ```
//!
//! The filter is taken from `RUST_LOG` when set, then from
//! [`Config::trace_level`](crate::Config::trace_level), then defaults to
//! `"info"`.

mod init;
mod tracer;

pub use init::init_tracing;
