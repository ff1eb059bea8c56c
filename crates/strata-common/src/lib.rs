//! Strata common types, errors, and configuration.
//!
//! This crate provides shared definitions used across all Strata components.

pub mod config;
pub mod error;
pub mod trace;

pub use config::{BTreeConfig, RmiConfig};
pub use error::{Result, StrataError};
pub use trace::{NullSink, TraceEvent, TraceSink, VecSink};
