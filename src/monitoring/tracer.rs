/*!
 * Tracing
 * Structured logging for the simulator using the tracing crate
 *
 * Logs always go to stderr; stdout is reserved for responses.
 */

use crate::core::limits::DEFAULT_LOG_FILTER;
use std::time::{Duration, Instant};
use tracing::{debug, info, span, warn, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Runs slower than this are reported at warn level
const SLOW_RUN: Duration = Duration::from_secs(1);

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: warn)
/// - MEMSIM_TRACE_JSON: Enable JSON output (read through `SimulatorConfig`)
pub fn init_tracing(json: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init();
        debug!("Structured tracing initialized with JSON output");
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .init();
        debug!("Structured tracing initialized");
    }
}

/// Span covering one run of a request stream, timed on drop
pub struct RunSpan {
    span: tracing::Span,
    start: Instant,
}

impl RunSpan {
    pub fn new(capacity: usize, requests: usize) -> Self {
        let span = span!(
            Level::INFO,
            "run",
            capacity = capacity,
            requests = requests,
            responses = tracing::field::Empty,
            duration_us = tracing::field::Empty,
        );
        Self {
            span,
            start: Instant::now(),
        }
    }

    /// Record the number of responses produced
    pub fn record_responses(&self, count: usize) {
        self.span.record("responses", count);
    }

    /// Enter the span context
    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

impl Drop for RunSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        let _entered = self.span.enter();
        self.span.record("duration_us", duration.as_micros() as u64);

        if duration > SLOW_RUN {
            warn!(
                duration_ms = duration.as_millis() as u64,
                slow = true,
                "slow run detected"
            );
        } else {
            info!(duration_us = duration.as_micros() as u64, "run completed");
        }
    }
}
