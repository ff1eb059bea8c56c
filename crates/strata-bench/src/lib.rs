//! Benchmark harness for the Strata indexes.
//!
//! External collaborator of the two index structures: generates sorted
//! unique datasets, times builds and searches, estimates sizes through the
//! read-only introspection surfaces, and renders an ASCII comparison
//! report. The library never prints; the binaries do.

pub mod dataset;
pub mod report;
pub mod runner;
pub mod timing;

pub use dataset::{generate_sorted_keys, try_generate_sorted_keys};
pub use report::render_report;
pub use runner::{run_benchmarks, BenchConfig, BenchmarkReport, StructureSeries};
pub use timing::time;
