//! Structured logging for salamgate.
//!
//! Wraps `tracing` with a console layer and a daily-rolling NDJSON
//! file layer, level-controlled via `RUST_LOG` or the configured
//! default.

pub mod logger;

pub use logger::init_logger;
