//! # chainform-observability
//!
//! Structured logging for ChainForm binaries. The libraries only emit
//! `tracing` events; this crate installs the subscriber that renders them,
//! either as human-readable text or as JSON lines for ELK / Loki.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, LogConfig, LogConfigError};
