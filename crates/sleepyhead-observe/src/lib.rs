//! Observability setup for SleepyHead: structured logging with optional
//! OpenTelemetry span export.

pub mod tracing_setup;
