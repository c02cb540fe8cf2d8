//! OpenTelemetry tracing exported to a local file.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → FileSpanExporter
//!                                                         → taskdeck-otlp.json
//! ```
//!
//! The terminal belongs to the UI, so spans never go to stdout. They are
//! written as OTLP-JSON, one batch per line, to `taskdeck-otlp.json` in the
//! data directory (see [`crate::infrastructure::paths::data_dir`]). The file
//! rotates at 10 MiB and keeps 3 backups.
//!
//! The level comes from the `trace_level` setting (config file,
//! `TASKDECK_TRACE_LEVEL` or `--trace-level`) and accepts any
//! `EnvFilter` directive, e.g. `taskdeck=debug,reqwest=warn`.

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, SERVICE_NAME, TRACE_FILE};
