//! Benchmark runner comparing the B-Tree against the learned index.

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::time::Duration;

use strata_btree::BTreeIndex;
use strata_common::{BTreeConfig, Result, RmiConfig};
use strata_rmi::LearnedIndex;

use crate::dataset::generate_sorted_keys;
use crate::timing::time;

/// Parameters for a benchmark run.
#[derive(Debug, Clone, Serialize)]
pub struct BenchConfig {
    /// Dataset sizes to test, each built and probed independently.
    pub sizes: Vec<usize>,
    /// Searches per dataset size; search times are averaged over these.
    pub searches: usize,
    /// Fraction of searches that target a key known to be present.
    pub hit_fraction: f64,
    pub btree: BTreeConfig,
    pub rmi: RmiConfig,
    /// RNG seed; identical seeds reproduce datasets and search mixes.
    pub seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: vec![1_000, 5_000, 10_000, 20_000],
            searches: 500,
            hit_fraction: 0.7,
            btree: BTreeConfig::default(),
            rmi: RmiConfig::default(),
            seed: 42,
        }
    }
}

/// Measured series for one index structure, one entry per dataset size.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StructureSeries {
    pub build_times: Vec<Duration>,
    pub mean_search_times: Vec<Duration>,
    pub memory_units: Vec<usize>,
}

/// Results of a full benchmark run.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub sizes: Vec<usize>,
    pub searches_per_size: usize,
    pub btree: StructureSeries,
    pub rmi: StructureSeries,
}

/// Runs the full comparison described by `config`.
///
/// For every size: generate a fresh sorted dataset, build both indexes
/// under the timer, run the search mix against each, and record the size
/// estimates from the introspection surfaces.
pub fn run_benchmarks(config: &BenchConfig) -> Result<BenchmarkReport> {
    config.btree.validate()?;
    config.rmi.validate()?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut report = BenchmarkReport {
        sizes: config.sizes.clone(),
        searches_per_size: config.searches,
        btree: StructureSeries::default(),
        rmi: StructureSeries::default(),
    };

    for &size in &config.sizes {
        // Values span ten times the count, so roughly one key in ten
        // values exists and miss probes land in real gaps.
        let value_max = (size as i64).saturating_mul(10).max(1);
        let data = generate_sorted_keys(&mut rng, size, 0, value_max);
        info!("benchmarking {} keys in [0, {value_max}]", data.len());

        let search_keys = search_mix(&mut rng, &data, config.searches, config.hit_fraction, value_max);

        // Learned index: one-shot batch build over the sorted data.
        let (built, build_time) = time(|| LearnedIndex::with_config(data.clone(), config.rmi));
        let rmi = built?;
        record_structure(
            &mut report.rmi,
            build_time,
            mean_search_time(&search_keys, |key| {
                std::hint::black_box(rmi.search(key));
            }),
            rmi.memory_estimate(),
        );

        // B-Tree: built by inserting every key incrementally.
        let (built, build_time) = time(|| -> Result<BTreeIndex> {
            let mut tree = BTreeIndex::with_config(config.btree)?;
            for &key in &data {
                tree.insert(key);
            }
            Ok(tree)
        });
        let btree = built?;
        record_structure(
            &mut report.btree,
            build_time,
            mean_search_time(&search_keys, |key| {
                std::hint::black_box(btree.search(key));
            }),
            btree.memory_estimate(),
        );
    }

    Ok(report)
}

/// Mixed probe set: `hit_fraction` present keys, the rest drawn from the
/// whole value range (mostly misses).
fn search_mix<R: Rng>(
    rng: &mut R,
    data: &[i64],
    searches: usize,
    hit_fraction: f64,
    value_max: i64,
) -> Vec<i64> {
    (0..searches)
        .map(|_| {
            if !data.is_empty() && rng.random_bool(hit_fraction.clamp(0.0, 1.0)) {
                data[rng.random_range(0..data.len())]
            } else {
                rng.random_range(0..=value_max + 100)
            }
        })
        .collect()
}

fn mean_search_time(search_keys: &[i64], mut probe: impl FnMut(i64)) -> Duration {
    let (_, total) = time(|| {
        for &key in search_keys {
            probe(key);
        }
    });
    total / search_keys.len().max(1) as u32
}

fn record_structure(
    series: &mut StructureSeries,
    build_time: Duration,
    mean_search: Duration,
    memory_units: usize,
) {
    series.build_times.push(build_time);
    series.mean_search_times.push(mean_search);
    series.memory_units.push(memory_units);
}
