//! Benchmark CLI comparing the B-Tree against the learned index.

use clap::Parser;

use strata_bench::report::render_report;
use strata_bench::runner::{run_benchmarks, BenchConfig};
use strata_common::{BTreeConfig, Result, RmiConfig};

/// Strata index benchmark
#[derive(Parser, Debug)]
#[command(
    name = "strata-bench",
    version,
    about = "Compare B-Tree and learned-index point lookups",
    long_about = "Builds both Strata index structures over freshly generated sorted\n\
                  datasets of the requested sizes, times construction and a mixed\n\
                  hit/miss search workload, and renders an ASCII comparison report."
)]
struct Args {
    /// Dataset sizes to benchmark
    #[arg(long, value_delimiter = ',', default_values_t = [1_000usize, 5_000, 10_000, 20_000])]
    sizes: Vec<usize>,

    /// Searches per dataset size
    #[arg(long, default_value_t = 500)]
    searches: usize,

    /// B-Tree minimum degree t
    #[arg(long, default_value_t = 3)]
    order: usize,

    /// Level-1 model count for the learned index
    #[arg(long, default_value_t = 100)]
    segments: usize,

    /// Correction window half-width for the learned index
    #[arg(long, default_value_t = 50)]
    window: usize,

    /// RNG seed (identical seeds reproduce the whole run)
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Write the raw report as JSON to this path
    #[arg(long)]
    json: Option<std::path::PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = BenchConfig {
        sizes: args.sizes,
        searches: args.searches,
        hit_fraction: 0.7,
        btree: BTreeConfig { order: args.order },
        rmi: RmiConfig {
            segment_count: args.segments,
            search_window: args.window,
        },
        seed: args.seed,
    };

    let report = run_benchmarks(&config)?;

    if let Some(path) = &args.json {
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
    }

    println!("{}", render_report(&report));
    Ok(())
}
