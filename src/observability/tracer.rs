//! OpenTelemetry tracer provider with file-based span export.
//!
//! Spans are appended to a local JSON-lines file instead of being sent to a
//! collector. Each exported batch becomes one line:
//!
//! ```json
//! {"service":"reelshelf","spans":[{"name":"worker_handle_message","trace_id":"…","span_id":"…","parent_span_id":"…","start_unix_nano":0,"end_unix_nano":0,"attributes":{"operation":"fetch movies"}}]}
//! ```
//!
//! The file is rotated to `<name>.1` once it grows past 10 MB.

use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, TraceError};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{json, Map, Value};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Size at which the trace file is rotated.
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Appends span batches to a JSON-lines file.
struct FileSpanExporter {
    file_path: PathBuf,
    service: String,
    file: Mutex<Option<File>>,
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    fn new(file_path: PathBuf, resource: &Resource) -> Self {
        let service = resource
            .get(opentelemetry::Key::from_static_str("service.name"))
            .map_or_else(|| "reelshelf".to_string(), |value| value.to_string());

        Self {
            file_path,
            service,
            file: Mutex::new(None),
            is_shutdown: AtomicBool::new(false),
        }
    }

    fn unix_nanos(time: SystemTime) -> u128 {
        time.duration_since(UNIX_EPOCH).map_or(0, |d| d.as_nanos())
    }

    fn format_span(span: &SpanData) -> Value {
        let attributes: Map<String, Value> = span
            .attributes
            .iter()
            .map(|kv| (kv.key.to_string(), Value::String(kv.value.to_string())))
            .collect();

        let parent = (span.parent_span_id != SpanId::INVALID)
            .then(|| format!("{:016x}", span.parent_span_id));

        json!({
            "name": span.name,
            "trace_id": format!("{:032x}", span.span_context.trace_id()),
            "span_id": format!("{:016x}", span.span_context.span_id()),
            "parent_span_id": parent,
            "start_unix_nano": Self::unix_nanos(span.start_time).to_string(),
            "end_unix_nano": Self::unix_nanos(span.end_time).to_string(),
            "attributes": attributes,
        })
    }

    fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| std::io::Error::other("trace file lock poisoned"))?;

        let too_large = std::fs::metadata(&self.file_path)
            .is_ok_and(|meta| meta.len() > MAX_FILE_SIZE_BYTES);
        if too_large {
            *guard = None;
            std::fs::rename(&self.file_path, self.file_path.with_extension("json.1"))?;
        }

        if guard.is_none() {
            *guard = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.file_path)?,
            );
        }

        match guard.as_mut() {
            Some(file) => writeln!(file, "{line}"),
            None => Ok(()),
        }
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        let spans: Vec<Value> = batch.iter().map(Self::format_span).collect();
        let line = json!({ "service": self.service, "spans": spans }).to_string();

        let result = self
            .write_line(&line)
            .map_err(|e| TraceError::from(e.to_string()));
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("file_path", &self.file_path)
            .field("service", &self.service)
            .field("is_shutdown", &self.is_shutdown)
            .finish_non_exhaustive()
    }
}

/// Creates a tracer provider that exports every span to `file_path` as soon
/// as it ends.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(file_path, &resource);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Tracer, TracerProvider as _};
    use opentelemetry::KeyValue;

    #[test]
    fn finished_spans_are_written_as_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reelshelf-otlp.json");
        let provider = create_tracer_provider(
            path.clone(),
            Resource::new(vec![KeyValue::new("service.name", "reelshelf")]),
        );

        provider.tracer("test").in_span("fetch_movies", |_cx| {});

        let contents = std::fs::read_to_string(&path).unwrap();
        let line: Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        assert_eq!(line["service"], "reelshelf");
        assert_eq!(line["spans"][0]["name"], "fetch_movies");
        assert!(line["spans"][0]["parent_span_id"].is_null());
    }
}
