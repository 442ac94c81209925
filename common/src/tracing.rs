use std::{env, io::Stderr};

use tracing_subscriber::{fmt::Layer, prelude::*, EnvFilter, Layer as TracingLayer};

/// Initializes a new tracing configuration.
///
/// - `rust_log`: Used as the filter directive if the RUST_LOG environment variable is not provided. You can set
///   the default log level (e.g. `warn`), but you can also configure module-specific log levels using comma-separated
///   entries formatted like `path::to::module=log_level`, e.g. `warn,common::listing=debug`
///
/// Logs are written to stderr, stdout is reserved for the report printed by each script.
/// Setting `JSON_LOGS` switches the output to one JSON object per event.
pub fn init_tracing(rust_log: &str) {
    let filter = match env::var("RUST_LOG") {
        Ok(directive) if !directive.is_empty() => EnvFilter::new(directive),
        _ => EnvFilter::new(rust_log),
    };

    let json_logs = env::var_os("JSON_LOGS").is_some();

    // Conditionally output logs as JSON
    if json_logs {
        let layer = Layer::new()
            .with_writer(std::io::stderr as fn() -> Stderr)
            .with_target(true)
            .json()
            .flatten_event(true)
            .with_span_list(false)
            .with_filter(filter);

        tracing_subscriber::registry().with(layer).init();
    } else {
        let layer = Layer::new()
            .with_writer(std::io::stderr as fn() -> Stderr)
            .with_target(true)
            .with_filter(filter);

        tracing_subscriber::registry().with(layer).init();
    }
}
